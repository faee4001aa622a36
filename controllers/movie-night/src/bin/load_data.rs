// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use controller::{Controller, Entity, Level, Value};
use indicatif::ProgressBar;
use movie_night::MovieNightController;
use std::collections::HashMap;

fn data_dir() -> String {
    std::env::args().nth(1).unwrap_or_else(|| "data".into())
}

fn load_users(controller: &MovieNightController) -> Result<HashMap<String, i32>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(format!("{}/users.csv", data_dir()))?;

    let mut ids = HashMap::new();
    for record in csv.records() {
        let record = record?;
        let name = record[0].to_string();

        let mut proto = HashMap::new();
        proto.insert("name", Value::String(name.clone()));

        let user = controller.insert_user(proto)?;
        ids.insert(name, user.get_id());
    }

    Ok(ids)
}

fn load_categories(controller: &MovieNightController) -> Result<HashMap<String, i32>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(format!("{}/categories.csv", data_dir()))?;

    let mut ids = HashMap::new();
    for record in csv.records() {
        let record = record?;
        let slug = record[1].to_string();

        let mut proto = HashMap::new();
        proto.insert("name", Value::String(record[0].to_string()));
        proto.insert("slug", Value::String(slug.clone()));
        proto.insert("description", Value::String(record[2].to_string()));

        let category = controller.insert_category(proto)?;
        ids.insert(slug, category.get_id());
    }

    Ok(ids)
}

fn load_items(
    controller: &MovieNightController,
    categories: &HashMap<String, i32>,
) -> Result<HashMap<String, i32>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(format!("{}/items.csv", data_dir()))?;

    let mut ids = HashMap::new();
    for record in csv.records() {
        // category_slug, title, year, director, genre, imdb_id
        let record = record?;
        let title = record[1].to_string();

        let mut proto = HashMap::new();
        proto.insert("category_id", Value::Int32(categories[&record[0]]));
        proto.insert("title", Value::String(title.clone()));

        if !record[2].is_empty() {
            proto.insert("year", Value::Int32(record[2].parse()?));
        }

        if !record[3].is_empty() {
            proto.insert("director", Value::String(record[3].to_string()));
        }

        if !record[4].is_empty() {
            proto.insert("genre", Value::String(record[4].to_string()));
        }

        if !record[5].is_empty() {
            proto.insert("imdb_id", Value::String(record[5].to_string()));
        }

        let movie = controller.insert_item(proto)?;
        ids.insert(title, movie.get_id());
    }

    Ok(ids)
}

fn load_ratings(
    controller: &MovieNightController,
    users: &HashMap<String, i32>,
    items: &HashMap<String, i32>,
) -> Result<(), Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(format!("{}/ratings.csv", data_dir()))?;

    let mut rows = Vec::new();
    for record in csv.records() {
        // user_name, item_title, level
        let record = record?;
        let level: Level = record[2].parse()?;
        rows.push((users[&record[0]], items[&record[1]], level));
    }

    let progress = ProgressBar::new(rows.len() as u64);
    for (user_id, item_id, level) in rows {
        controller.submit_rating(&user_id, &item_id, level)?;
        progress.inc(1);
    }

    progress.finish();
    Ok(())
}

fn main() -> Result<(), Error> {
    let controller = MovieNightController::new()?;

    let users = load_users(&controller)?;
    println!("Inserted {} users", users.len());

    let categories = load_categories(&controller)?;
    println!("Inserted {} categories", categories.len());

    let items = load_items(&controller, &categories)?;
    println!("Inserted {} items", items.len());

    load_ratings(&controller, &users, &items)?;

    Ok(())
}
