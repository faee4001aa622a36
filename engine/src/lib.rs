// Copyright (C) 2020 Kevin Del Castillo Ramírez
//
// This file is part of popquiz.
//
// popquiz is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// popquiz is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with popquiz.  If not, see <http://www.gnu.org/licenses/>.

pub mod compare;
pub mod eclectic;
pub mod profile;
pub mod ranking;
pub mod score;
pub mod utils;

use crate::compare::{PairComparison, TripleComparison};
use crate::eclectic::UserEclecticism;
use crate::profile::{ProfileRow, ProfileSummary, SortKey};
use crate::ranking::{DivisiveItem, RankedItem};
use crate::score::{ItemScore, LevelCounts};
use anyhow::Error;
use config::EngineConfig;
use controller::{eid, Controller, Entity, Item, User};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Stateless front door to the aggregation functions: reads the rows the
/// controller returns at call time and recomputes from scratch, so the
/// result can never be stale.
pub struct Engine<'a, C>
where
    C: Controller,
{
    controller: &'a C,
    config: EngineConfig,
}

impl<'a, C> Engine<'a, C>
where
    C: Controller,
    eid!(C::User): Hash + Eq + Clone,
    eid!(C::Item): Hash + Eq + Clone + Ord,
{
    pub fn with_controller(controller: &'a C, config: &EngineConfig) -> Self {
        Self {
            controller,
            config: config.clone(),
        }
    }

    pub fn item_score(&self, item: &C::Item) -> Result<ItemScore, Error> {
        let ratings = self.controller.item_ratings(item)?;
        Ok(score::item_score(&ratings))
    }

    /// Overall ranking of a category, best display score first.
    pub fn ranking(&self, category: &C::Category) -> Result<Vec<RankedItem<eid!(C::Item)>>, Error> {
        let items = self.controller.items_in(category)?;
        let by_item = self.controller.items_ratings(&items)?;
        log::debug!("ranking {} items", items.len());

        let empty = HashMap::new();
        let scored = items
            .iter()
            .map(|item| {
                let id = item.get_id();
                let ratings = by_item.get(&id).unwrap_or(&empty);

                RankedItem {
                    title: item.title().to_owned(),
                    score: score::item_score(ratings),
                    id,
                }
            })
            .collect();

        Ok(ranking::rank_items(scored))
    }

    /// Same ranking rule applied inside each decade, most recent decade
    /// first. Items without a release year don't appear anywhere here.
    pub fn decade_ranking(
        &self,
        category: &C::Category,
    ) -> Result<Vec<(i32, Vec<RankedItem<eid!(C::Item)>>)>, Error> {
        let items = self.controller.items_in(category)?;
        let by_item = self.controller.items_ratings(&items)?;

        let empty = HashMap::new();
        let scored = items
            .iter()
            .map(|item| {
                let id = item.get_id();
                let ratings = by_item.get(&id).unwrap_or(&empty);

                let ranked = RankedItem {
                    title: item.title().to_owned(),
                    score: score::item_score(ratings),
                    id,
                };

                (item.year(), ranked)
            })
            .collect();

        Ok(ranking::rank_by_decade(scored))
    }

    /// Most polarizing items first. Items with fewer than two ratings
    /// have no defined spread and are left out entirely.
    pub fn divisive_ranking(
        &self,
        category: &C::Category,
    ) -> Result<Vec<DivisiveItem<eid!(C::Item)>>, Error> {
        let items = self.controller.items_in(category)?;
        let by_item = self.controller.items_ratings(&items)?;

        let mut divisive = Vec::new();
        for item in &items {
            let id = item.get_id();

            if let Some(ratings) = by_item.get(&id) {
                if let Some(spread) = score::divisiveness(ratings) {
                    divisive.push(DivisiveItem {
                        title: item.title().to_owned(),
                        spread,
                        id,
                    });
                }
            }
        }

        Ok(ranking::rank_divisive(divisive))
    }

    /// Users ordered by how often they disagree with the category
    /// consensus; users with nothing rated in the category are absent.
    pub fn eclectic_ranking(
        &self,
        category: &C::Category,
    ) -> Result<Vec<(String, UserEclecticism<eid!(C::Item)>)>, Error> {
        let items = self.controller.items_in(category)?;
        let by_item = self.controller.items_ratings(&items)?;
        log::debug!("eclectic ranking over {} items", items.len());

        let means: HashMap<eid!(C::Item), f64> = by_item
            .iter()
            .filter_map(|(item_id, ratings)| {
                let score = score::item_score(ratings);
                if score.rating_count == 0 {
                    None
                } else {
                    Some((item_id.clone(), score.mean))
                }
            })
            .collect();

        let by_user = utils::transpose(&by_item);
        let scores = eclectic::eclecticism(
            &by_user,
            &means,
            self.config.agreement_threshold,
            self.config.contrarian_samples,
        );

        let users = self.controller.users()?;
        let mut ranked: Vec<_> = users
            .iter()
            .filter_map(|user| {
                scores
                    .get(&user.get_id())
                    .map(|scored| (user.name().to_owned(), scored.clone()))
            })
            .collect();

        ranked.sort_by(|(a_name, a), (b_name, b)| {
            b.disagreement_ratio
                .partial_cmp(&a.disagreement_ratio)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a_name.cmp(b_name))
        });

        Ok(ranked)
    }

    pub fn compare(
        &self,
        user_a: &C::User,
        user_b: &C::User,
    ) -> Result<PairComparison<eid!(C::Item)>, Error> {
        let ratings_a = self.controller.user_ratings(user_a)?;
        let ratings_b = self.controller.user_ratings(user_b)?;

        Ok(compare::compare_pair(&ratings_a, &ratings_b))
    }

    pub fn compare_triple(
        &self,
        user_a: &C::User,
        user_b: &C::User,
        user_c: &C::User,
    ) -> Result<TripleComparison<eid!(C::Item)>, Error> {
        let ratings_a = self.controller.user_ratings(user_a)?;
        let ratings_b = self.controller.user_ratings(user_b)?;
        let ratings_c = self.controller.user_ratings(user_c)?;

        Ok(compare::compare_triple(&ratings_a, &ratings_b, &ratings_c))
    }

    /// What this user should rate next in a category: everything they
    /// have no stored row for, most popular first.
    pub fn next_up(&self, user: &C::User, category: &C::Category) -> Result<Vec<C::Item>, Error> {
        let items = self.controller.items_in(category)?;
        let by_item = self.controller.items_ratings(&items)?;
        let seen: HashSet<eid!(C::Item)> = self
            .controller
            .user_ratings(user)?
            .keys()
            .cloned()
            .collect();

        let pool = items
            .iter()
            .map(|item| {
                let id = item.get_id();
                let popularity = by_item.get(&id).map_or(0, |ratings| ratings.len());
                (id, item.title().to_owned(), popularity)
            })
            .collect();

        let mut lookup: HashMap<eid!(C::Item), C::Item> = items
            .into_iter()
            .map(|item| (item.get_id(), item))
            .collect();

        Ok(ranking::next_up(pool, &seen)
            .into_iter()
            .filter_map(|(id, _, _)| lookup.remove(&id))
            .collect())
    }

    /// Everything a user has rated, across categories, under a sort key.
    pub fn profile(
        &self,
        user: &C::User,
        key: SortKey,
    ) -> Result<ProfileSummary<eid!(C::Item)>, Error> {
        let stored = self.controller.user_ratings(user)?;
        let items = self.controller.items()?;
        let by_item = self.controller.items_ratings(&items)?;

        let mut rows = Vec::new();
        for item in &items {
            let id = item.get_id();

            let level = match stored.get(&id) {
                Some(level) => *level,
                None => continue,
            };

            if !level.is_rated() {
                continue;
            }

            let popularity = by_item.get(&id).map_or(0, |ratings| ratings.len());
            rows.push(ProfileRow {
                title: item.title().to_owned(),
                year: item.year(),
                director: item.director().map(str::to_owned),
                genre: item.genre().map(str::to_owned),
                level,
                popularity,
                item_id: id,
            });
        }

        profile::sort_profile(&mut rows, key);

        Ok(ProfileSummary {
            rows,
            counts: LevelCounts::tally(stored.values()),
        })
    }
}
