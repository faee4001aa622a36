use crate::schema::*;
use controller::error::ErrorKind;
use controller::{Entity, Item as ItemTrait, Level, User as UserTrait};
use std::collections::HashMap;
use std::time::SystemTime;

// To query data from the database
#[derive(Debug, Clone, Queryable)]
pub struct User {
    pub id: i32,
    pub name: String,
}

// To insert a new user into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub name: &'a str,
}

impl Entity for User {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert("name".into(), self.name.clone());
        data
    }
}

impl UserTrait for User {
    fn name(&self) -> &str {
        &self.name
    }
}

// To query data from the database
#[derive(Debug, Clone, Queryable)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
}

// To insert a new category into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "categories"]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
}

impl Entity for Category {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert("name".into(), self.name.clone());
        data.insert("slug".into(), self.slug.clone());
        data
    }
}

// To query data from the database
#[derive(Debug, Clone, Queryable)]
pub struct Movie {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub imdb_id: Option<String>,
}

// To insert a new movie into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "items"]
pub struct NewMovie<'a> {
    pub category_id: i32,
    pub title: &'a str,
    pub year: Option<i32>,
    pub director: Option<&'a str>,
    pub genre: Option<&'a str>,
    pub imdb_id: Option<&'a str>,
}

impl Entity for Movie {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert("title".into(), self.title.clone());

        if let Some(year) = self.year {
            data.insert("year".into(), year.to_string());
        }

        if let Some(director) = &self.director {
            data.insert("director".into(), director.clone());
        }

        if let Some(genre) = &self.genre {
            data.insert("genre".into(), genre.clone());
        }

        data
    }
}

impl ItemTrait for Movie {
    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn director(&self) -> Option<&str> {
        self.director.as_deref()
    }

    fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }
}

// To query data from the database
#[derive(Debug, Clone, Queryable)]
pub struct Rating {
    pub id: i32,
    pub user_id: i32,
    pub item_id: i32,
    pub level: String,
    pub updated_at: SystemTime,
}

// To insert a new rating into the database; updated_at is filled by the
// column default
#[derive(Debug, Clone, Insertable)]
#[table_name = "ratings"]
pub struct NewRating<'a> {
    pub user_id: i32,
    pub item_id: i32,
    pub level: &'a str,
}

impl Rating {
    /// Parse the persisted wire string; a row that doesn't parse is a
    /// typed error, never a silent skip.
    pub fn level(&self) -> Result<Level, ErrorKind> {
        self.level.parse()
    }
}

impl Entity for Rating {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert("user_id".into(), self.user_id.to_string());
        data.insert("item_id".into(), self.item_id.to_string());
        data.insert("level".into(), self.level.clone());
        data
    }
}
