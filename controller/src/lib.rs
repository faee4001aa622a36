// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod entity;
pub mod error;
pub mod level;
pub mod searchby;
pub mod values;

#[macro_export]
macro_rules! eid {
    ($e:ty) => {
        <$e as $crate::entity::Entity>::Id
    };
}

#[macro_export]
macro_rules! maped_ratings {
    ($u:ty => $v:ty) => {
        $crate::MapedRatings<$crate::eid!($u), $crate::eid!($v)>
    };
}

#[macro_export]
macro_rules! ratings {
    ($e:ty) => {
        $crate::Ratings<$crate::eid!($e)>
    }
}

use anyhow::Error;
use std::collections::HashMap;

pub use entity::{Entity, Item, ToTable, User};
pub use level::Level;
pub use searchby::SearchBy;
pub use values::{Field, Type, Value};

pub type Result<T> = std::result::Result<T, Error>;
pub type Ratings<I> = HashMap<I, Level>;
pub type MapedRatings<K, I> = HashMap<K, Ratings<I>>;

pub trait Controller {
    type User: User;
    type Item: Item;
    type Category: Entity;
    type Rating: Entity;

    /// Get all users
    fn users(&self) -> Result<Vec<Self::User>>;

    /// Get users that matched the search criteria by id, name or custom (if implemented)
    fn users_by(&self, by: &SearchBy) -> Result<Vec<Self::User>>;

    /// Get all items
    fn items(&self) -> Result<Vec<Self::Item>>;

    /// Get items that matched the search criteria by id, title or custom (if implemented)
    fn items_by(&self, by: &SearchBy) -> Result<Vec<Self::Item>>;

    /// Get the items that belong to a category
    fn items_in(&self, category: &Self::Category) -> Result<Vec<Self::Item>>;

    /// Get all categories
    fn categories(&self) -> Result<Vec<Self::Category>>;

    /// Get categories that matched the search criteria by id, name or slug
    fn categories_by(&self, by: &SearchBy) -> Result<Vec<Self::Category>>;

    /// Get every stored rating of a user keyed by item, NotRated rows included
    fn user_ratings(&self, user: &Self::User) -> Result<ratings!(Self::Item)>;

    /// Get every stored rating for an item keyed by user, NotRated rows included
    fn item_ratings(&self, item: &Self::Item) -> Result<ratings!(Self::User)>;

    /// Bulk version of `item_ratings`, i.e. maps Item::Id => User::Id => Level
    #[allow(clippy::type_complexity)]
    fn items_ratings(
        &self,
        items: &[Self::Item],
    ) -> Result<maped_ratings!(Self::Item => Self::User)>;

    /// Return a list of fields required to insert a new user
    fn fields_for_users(&self) -> Vec<Field>;

    /// Return a list of fields required to insert a new item
    fn fields_for_items(&self) -> Vec<Field>;

    /// Insert a new user from a prototype
    fn insert_user<'a>(&self, proto: HashMap<&'a str, Value>) -> Result<Self::User>;

    /// Insert a new item from a prototype
    fn insert_item<'a>(&self, proto: HashMap<&'a str, Value>) -> Result<Self::Item>;

    /// Upsert the rating of a user for an item; there's at most one row per
    /// (user, item) pair and a resubmission overwrites it in place
    fn submit_rating(
        &self,
        user_id: &eid!(Self::User),
        item_id: &eid!(Self::Item),
        level: Level,
    ) -> Result<Self::Rating>;

    /// Remove the rating of a user for an item (administrative, never part
    /// of a ranking path)
    fn remove_rating(
        &self,
        user_id: &eid!(Self::User),
        item_id: &eid!(Self::Item),
    ) -> Result<Self::Rating>;
}
