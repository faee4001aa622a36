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

use controller::{Level, MapedRatings, Ratings};
use std::collections::hash_map::Iter as MapIter;
use std::collections::HashMap;
use std::hash::Hash;

// Iterates the items both users actually rated, walking the shorter map
// and probing the longer one. NotRated rows on either side are skipped,
// so callers never see a sentinel in a shared pair.
pub fn common_rated_iter<'a, K>(a: &'a Ratings<K>, b: &'a Ratings<K>) -> CommonRatedIterator<'a, K>
where
    K: Hash + Eq,
{
    let (shortest, longest) = if a.len() > b.len() { (b, a) } else { (a, b) };
    let swapped = a.len() > b.len();

    CommonRatedIterator {
        shortest: shortest.iter(),
        longest,
        swapped,
    }
}

#[derive(Debug)]
pub struct CommonRatedIterator<'a, K>
where
    K: Hash + Eq,
{
    shortest: MapIter<'a, K, Level>,
    longest: &'a Ratings<K>,
    swapped: bool,
}

impl<'a, K> Iterator for CommonRatedIterator<'a, K>
where
    K: Hash + Eq,
{
    type Item = (&'a K, (Level, Level));

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, level) = self.shortest.next()?;
            if !level.is_rated() {
                continue;
            }

            if let Some(other) = self.longest.get(key) {
                if other.is_rated() {
                    // Keep (a, b) order no matter which map was walked
                    let pair = if self.swapped {
                        (*other, *level)
                    } else {
                        (*level, *other)
                    };

                    break Some((key, pair));
                }
            }
        }
    }
}

/// Flip an Item => User => Level map into User => Item => Level.
pub fn transpose<K, I>(maped: &MapedRatings<K, I>) -> MapedRatings<I, K>
where
    K: Hash + Eq + Clone,
    I: Hash + Eq + Clone,
{
    let mut transposed: MapedRatings<I, K> = HashMap::new();

    for (key, ratings) in maped {
        for (inner, level) in ratings {
            transposed
                .entry(inner.clone())
                .or_default()
                .insert(key.clone(), *level);
        }
    }

    transposed
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_macros::hash_map;
    use controller::Level;

    #[test]
    fn common_rated_skips_not_rated_and_non_shared() {
        let a = hash_map! {
            0 => Level::Loved,
            1 => Level::NotRated,
            2 => Level::Okay,
            5 => Level::Hated,
        };

        let b = hash_map! {
            0 => Level::Liked,
            1 => Level::Loved,
            2 => Level::NotRated,
            4 => Level::Okay,
        };

        let shared: Vec<_> = common_rated_iter(&a, &b).collect();

        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0], (&0, (Level::Loved, Level::Liked)));
    }

    #[test]
    fn common_rated_keeps_argument_order() {
        let a = hash_map! { 0 => Level::Loved };
        let b = hash_map! {
            0 => Level::Hated,
            1 => Level::Okay,
            2 => Level::Okay,
        };

        for (_, (from_a, from_b)) in common_rated_iter(&a, &b) {
            assert_eq!(from_a, Level::Loved);
            assert_eq!(from_b, Level::Hated);
        }

        for (_, (from_b, from_a)) in common_rated_iter(&b, &a) {
            assert_eq!(from_b, Level::Hated);
            assert_eq!(from_a, Level::Loved);
        }
    }

    #[test]
    fn transpose_flips_both_keys() {
        let by_item = hash_map! {
            "alien" => hash_map! { 1 => Level::Loved, 2 => Level::Okay },
            "heat" => hash_map! { 1 => Level::Hated },
        };

        let by_user = transpose(&by_item);

        assert_eq!(by_user[&1]["alien"], Level::Loved);
        assert_eq!(by_user[&1]["heat"], Level::Hated);
        assert_eq!(by_user[&2]["alien"], Level::Okay);
        assert_eq!(by_user[&2].len(), 1);
    }
}
