// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[macro_use]
extern crate diesel;

pub mod models;
pub mod schema;

use crate::models::{Category, Movie, NewCategory, NewMovie, NewRating, NewUser, Rating, User};
use crate::schema::{categories, items, ratings, users};
use anyhow::Error;
use controller::error::ErrorKind;
use controller::{
    eid, maped_ratings, ratings, Controller, Field, Level, Result, SearchBy, Type, Value,
};
use diesel::pg::upsert::on_constraint;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

pub fn establish_connection(url: &str) -> Result<PgConnection> {
    Ok(PgConnection::establish(url)?)
}

pub struct MovieNightController {
    pg_conn: PgConnection,
}

impl MovieNightController {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok();
        let url = std::env::var("DATABASE_URL")?;
        Self::with_url(&url)
    }

    pub fn with_url(url: &str) -> Result<Self> {
        let pg_conn = establish_connection(url)?;
        Ok(Self { pg_conn })
    }

    fn ratings_rows_to_map<K, F>(rows: Vec<Rating>, key: F) -> Result<HashMap<K, Level>>
    where
        K: std::hash::Hash + Eq,
        F: Fn(&Rating) -> K,
    {
        let mut map = HashMap::new();
        for row in rows {
            map.insert(key(&row), row.level()?);
        }

        Ok(map)
    }

    /// Categories aren't part of the `Controller` contract, inserting one
    /// is specific to this store.
    pub fn insert_category<'a>(&self, proto: HashMap<&'a str, Value>) -> Result<Category> {
        let name = proto
            .get("name")
            .ok_or_else(|| ErrorKind::ValueConvert("Missing field name".into()))?
            .as_string()?;

        let slug = proto
            .get("slug")
            .ok_or_else(|| ErrorKind::ValueConvert("Missing field slug".into()))?
            .as_string()?;

        let description = proto
            .get("description")
            .map(|val| val.as_string())
            .transpose()?
            .unwrap_or_default();

        let category = diesel::insert_into(categories::table)
            .values(&NewCategory {
                name,
                slug,
                description,
            })
            .get_result(&self.pg_conn)?;

        Ok(category)
    }
}

impl Controller for MovieNightController {
    type User = User;
    type Item = Movie;
    type Category = Category;
    type Rating = Rating;

    fn users(&self) -> Result<Vec<User>> {
        Ok(users::table.load(&self.pg_conn)?)
    }

    fn users_by(&self, by: &SearchBy) -> Result<Vec<User>> {
        match by {
            SearchBy::Id(id) => {
                let parsed: i32 = id.parse()?;
                let found = users::table
                    .filter(users::id.eq(parsed))
                    .load(&self.pg_conn)?;

                if found.is_empty() {
                    Err(ErrorKind::NotFoundById(id.clone()).into())
                } else {
                    Ok(found)
                }
            }

            SearchBy::Name(name) => {
                let found = users::table
                    .filter(users::name.eq(name))
                    .load(&self.pg_conn)?;

                if found.is_empty() {
                    Err(ErrorKind::NotFoundByName(name.clone()).into())
                } else {
                    Ok(found)
                }
            }

            SearchBy::Custom(_, _) => Err(ErrorKind::NotImplemented.into()),
        }
    }

    fn items(&self) -> Result<Vec<Movie>> {
        Ok(items::table.load(&self.pg_conn)?)
    }

    fn items_by(&self, by: &SearchBy) -> Result<Vec<Movie>> {
        match by {
            SearchBy::Id(id) => {
                let parsed: i32 = id.parse()?;
                let found = items::table
                    .filter(items::id.eq(parsed))
                    .load(&self.pg_conn)?;

                if found.is_empty() {
                    Err(ErrorKind::NotFoundById(id.clone()).into())
                } else {
                    Ok(found)
                }
            }

            SearchBy::Name(title) => {
                let found = items::table
                    .filter(items::title.eq(title))
                    .load(&self.pg_conn)?;

                if found.is_empty() {
                    Err(ErrorKind::NotFoundByName(title.clone()).into())
                } else {
                    Ok(found)
                }
            }

            SearchBy::Custom(key, val) if key == "director" => {
                let found = items::table
                    .filter(items::director.eq(val))
                    .load(&self.pg_conn)?;

                if found.is_empty() {
                    Err(ErrorKind::NotFoundByCustom(key.clone(), val.clone()).into())
                } else {
                    Ok(found)
                }
            }

            SearchBy::Custom(_, _) => Err(ErrorKind::NotImplemented.into()),
        }
    }

    fn items_in(&self, category: &Category) -> Result<Vec<Movie>> {
        Ok(items::table
            .filter(items::category_id.eq(category.id))
            .load(&self.pg_conn)?)
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(categories::table.load(&self.pg_conn)?)
    }

    fn categories_by(&self, by: &SearchBy) -> Result<Vec<Category>> {
        match by {
            SearchBy::Id(id) => {
                let parsed: i32 = id.parse()?;
                let found = categories::table
                    .filter(categories::id.eq(parsed))
                    .load(&self.pg_conn)?;

                if found.is_empty() {
                    Err(ErrorKind::NotFoundById(id.clone()).into())
                } else {
                    Ok(found)
                }
            }

            SearchBy::Name(name) => {
                let found = categories::table
                    .filter(categories::name.eq(name))
                    .load(&self.pg_conn)?;

                if found.is_empty() {
                    Err(ErrorKind::NotFoundByName(name.clone()).into())
                } else {
                    Ok(found)
                }
            }

            SearchBy::Custom(key, val) if key == "slug" => {
                let found = categories::table
                    .filter(categories::slug.eq(val))
                    .load(&self.pg_conn)?;

                if found.is_empty() {
                    Err(ErrorKind::NotFoundByCustom(key.clone(), val.clone()).into())
                } else {
                    Ok(found)
                }
            }

            SearchBy::Custom(_, _) => Err(ErrorKind::NotImplemented.into()),
        }
    }

    fn user_ratings(&self, user: &User) -> Result<ratings!(Movie)> {
        let rows = ratings::table
            .filter(ratings::user_id.eq(user.id))
            .load(&self.pg_conn)?;

        Self::ratings_rows_to_map(rows, |row| row.item_id)
    }

    fn item_ratings(&self, item: &Movie) -> Result<ratings!(User)> {
        let rows = ratings::table
            .filter(ratings::item_id.eq(item.id))
            .load(&self.pg_conn)?;

        Self::ratings_rows_to_map(rows, |row| row.user_id)
    }

    fn items_ratings(&self, movies: &[Movie]) -> Result<maped_ratings!(Movie => User)> {
        let ids: Vec<i32> = movies.iter().map(|movie| movie.id).collect();

        let rows: Vec<Rating> = ratings::table
            .filter(ratings::item_id.eq_any(&ids))
            .load(&self.pg_conn)?;

        let mut maped: maped_ratings!(Movie => User) = HashMap::new();
        for row in rows {
            let level = row.level()?;
            maped.entry(row.item_id).or_default().insert(row.user_id, level);
        }

        Ok(maped)
    }

    fn fields_for_users(&self) -> Vec<Field> {
        vec![Field::Required("name", Type::String)]
    }

    fn fields_for_items(&self) -> Vec<Field> {
        vec![
            Field::Required("title", Type::String),
            Field::Required("category_id", Type::Int32),
            Field::Optional("year", Type::Int32),
            Field::Optional("director", Type::String),
            Field::Optional("genre", Type::String),
            Field::Optional("imdb_id", Type::String),
        ]
    }

    fn insert_user<'a>(&self, proto: HashMap<&'a str, Value>) -> Result<User> {
        let name = proto
            .get("name")
            .ok_or_else(|| ErrorKind::ValueConvert("Missing field name".into()))?
            .as_string()?;

        let user = diesel::insert_into(users::table)
            .values(&NewUser { name })
            .get_result(&self.pg_conn)?;

        Ok(user)
    }

    fn insert_item<'a>(&self, proto: HashMap<&'a str, Value>) -> Result<Movie> {
        let title = proto
            .get("title")
            .ok_or_else(|| ErrorKind::ValueConvert("Missing field title".into()))?
            .as_string()?;

        let category_id = proto
            .get("category_id")
            .ok_or_else(|| ErrorKind::ValueConvert("Missing field category_id".into()))?
            .as_i32()?;

        let year = proto.get("year").map(|val| val.as_i32()).transpose()?;
        let director = proto.get("director").map(|val| val.as_string()).transpose()?;
        let genre = proto.get("genre").map(|val| val.as_string()).transpose()?;
        let imdb_id = proto.get("imdb_id").map(|val| val.as_string()).transpose()?;

        let movie = diesel::insert_into(items::table)
            .values(&NewMovie {
                category_id,
                title,
                year,
                director,
                genre,
                imdb_id,
            })
            .get_result(&self.pg_conn)?;

        Ok(movie)
    }

    fn submit_rating(
        &self,
        user_id: &eid!(User),
        item_id: &eid!(Movie),
        level: Level,
    ) -> Result<Rating> {
        let new_rating = NewRating {
            user_id: *user_id,
            item_id: *item_id,
            level: level.as_str(),
        };

        diesel::insert_into(ratings::table)
            .values(&new_rating)
            .on_conflict(on_constraint("ratings_user_item_unique"))
            .do_update()
            .set((
                ratings::level.eq(level.as_str()),
                ratings::updated_at.eq(diesel::dsl::now),
            ))
            .get_result(&self.pg_conn)
            .map_err(|_| {
                ErrorKind::InsertRatingFailed(user_id.to_string(), item_id.to_string()).into()
            })
    }

    fn remove_rating(&self, user_id: &eid!(User), item_id: &eid!(Movie)) -> Result<Rating> {
        diesel::delete(
            ratings::table
                .filter(ratings::user_id.eq(*user_id))
                .filter(ratings::item_id.eq(*item_id)),
        )
        .get_result(&self.pg_conn)
        .map_err(|_| {
            ErrorKind::UpdateRatingFailed(user_id.to_string(), item_id.to_string()).into()
        })
    }
}

#[cfg(feature = "test-controller")]
#[cfg(test)]
mod tests {
    use super::*;
    use controller::{Entity, User as UserTrait};

    #[test]
    fn query_user_by_id() -> Result<()> {
        let controller = MovieNightController::new()?;

        let user = &controller.users_by(&SearchBy::id("1"))?[0];
        assert_eq!(user.get_id(), 1);

        Ok(())
    }

    #[test]
    fn query_user_by_name() -> Result<()> {
        let controller = MovieNightController::new()?;

        let users = controller.users_by(&SearchBy::name("Ann"))?;
        for user in users {
            assert_eq!("Ann", user.name());
        }

        Ok(())
    }

    #[test]
    fn resubmitting_keeps_a_single_row() -> Result<()> {
        let controller = MovieNightController::new()?;

        controller.submit_rating(&1, &1, Level::Liked)?;
        let rating = controller.submit_rating(&1, &1, Level::Loved)?;
        assert_eq!(rating.level()?, Level::Loved);

        let user = &controller.users_by(&SearchBy::id("1"))?[0];
        let ratings = controller.user_ratings(user)?;
        assert_eq!(ratings[&1], Level::Loved);

        Ok(())
    }
}
