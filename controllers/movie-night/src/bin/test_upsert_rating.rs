// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use controller::{Controller, Level, SearchBy};
use movie_night::MovieNightController;

fn main() -> Result<(), Error> {
    let controller = MovieNightController::new()?;

    let user_id = 1;
    let item_id = 1;

    let first = controller.submit_rating(&user_id, &item_id, Level::Liked)?;
    println!("First submission: {:?}", first);

    let second = controller.submit_rating(&user_id, &item_id, Level::Loved)?;
    println!("Second submission: {:?}", second);

    let user = &controller.users_by(&SearchBy::id("1"))?[0];
    let ratings = controller.user_ratings(user)?;
    println!("Stored level is now: {:?}", ratings.get(&item_id));

    let removed = controller.remove_rating(&user_id, &item_id)?;
    println!("Removed rating: {:?}", removed);

    Ok(())
}
