#![allow(clippy::implicit_hasher)]

use controller::{Level, MapedRatings};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// The level the group settled on for an item: its mean rounded to the
/// nearest rung, clamped to [-2, 2]. Halves round away from zero.
pub fn consensus_level(mean: f64) -> Level {
    let rounded = mean.round().max(-2.0).min(2.0) as i8;
    Level::from_numeric(rounded)
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserEclecticism<ItemId> {
    pub rated: usize,
    pub disagreements: usize,
    pub disagreement_ratio: f64,
    /// Up to N items where this user strayed furthest from the mean,
    /// ties broken by item id so the sample is reproducible.
    pub contrarian: Vec<ItemId>,
}

/// Measure how often each user disagrees with the consensus. A rating
/// counts as disagreement when it sits more than `threshold` rungs from
/// the item's rounded consensus. Users with nothing rated are absent from
/// the result, not scored zero.
pub fn eclecticism<UserId, ItemId>(
    users_ratings: &MapedRatings<UserId, ItemId>,
    item_means: &HashMap<ItemId, f64>,
    threshold: i32,
    samples: usize,
) -> HashMap<UserId, UserEclecticism<ItemId>>
where
    UserId: Hash + Eq + Clone,
    ItemId: Hash + Eq + Clone + Ord,
{
    let mut result = HashMap::new();

    for (user_id, ratings) in users_ratings {
        let mut rated = 0;
        let mut disagreements = 0;
        let mut deltas: Vec<(ItemId, f64)> = Vec::new();

        for (item_id, level) in ratings {
            let value = match level.numeric_value() {
                Some(value) => value,
                None => continue,
            };

            let mean = match item_means.get(item_id) {
                Some(mean) => *mean,
                None => continue,
            };

            rated += 1;

            let consensus = consensus_level(mean).numeric_value().unwrap_or(0);
            if (i32::from(value) - i32::from(consensus)).abs() > threshold {
                disagreements += 1;
            }

            deltas.push((item_id.clone(), (f64::from(value) - mean).abs()));
        }

        if rated == 0 {
            continue;
        }

        deltas.sort_by(|(a_id, a_delta), (b_id, b_delta)| {
            b_delta
                .partial_cmp(a_delta)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a_id.cmp(b_id))
        });
        deltas.truncate(samples);

        result.insert(
            user_id.clone(),
            UserEclecticism {
                rated,
                disagreements,
                disagreement_ratio: disagreements as f64 / rated as f64,
                contrarian: deltas.into_iter().map(|(id, _)| id).collect(),
            },
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::*;
    use common_macros::hash_map;

    #[test]
    fn consensus_rounds_and_clamps() {
        assert_eq!(consensus_level(1.5), Level::Loved);
        assert_eq!(consensus_level(0.5), Level::Liked);
        assert_eq!(consensus_level(-0.4), Level::Okay);
        assert_eq!(consensus_level(-1.2), Level::Disliked);
        assert_eq!(consensus_level(-2.3), Level::Hated);
        assert_eq!(consensus_level(0.0), Level::Okay);
    }

    #[test]
    fn within_one_rung_is_agreement() {
        let users = hash_map! {
            "ann" => hash_map! {
                1 => Level::Liked,  // consensus Loved, one rung away
                2 => Level::Hated,  // consensus Liked, three rungs away
            },
        };

        let means = hash_map! {
            1 => 1.8,
            2 => 1.2,
        };

        let scores = eclecticism(&users, &means, 1, 5);
        let ann = &scores["ann"];

        assert_eq!(ann.rated, 2);
        assert_eq!(ann.disagreements, 1);
        assert_approx_eq!(ann.disagreement_ratio, 0.5);
    }

    #[test]
    fn threshold_is_configurable() {
        let users = hash_map! {
            "ann" => hash_map! { 1 => Level::Liked },
        };

        let means = hash_map! { 1 => 1.8 };

        // With a zero threshold even an adjacent rung disagrees
        let strict = eclecticism(&users, &means, 0, 5);
        assert_eq!(strict["ann"].disagreements, 1);

        let lax = eclecticism(&users, &means, 1, 5);
        assert_eq!(lax["ann"].disagreements, 0);
    }

    #[test]
    fn users_without_ratings_are_excluded() {
        let users = hash_map! {
            "ann" => hash_map! { 1 => Level::Loved },
            "bob" => hash_map! { 1 => Level::NotRated },
            "eve" => hash_map! {},
        };

        let means = hash_map! { 1 => 2.0 };
        let scores = eclecticism(&users, &means, 1, 5);

        assert!(scores.contains_key("ann"));
        assert!(!scores.contains_key("bob"));
        assert!(!scores.contains_key("eve"));
    }

    #[test]
    fn contrarian_sample_is_capped_and_deterministic() {
        let users = hash_map! {
            "ann" => hash_map! {
                1 => Level::Hated,   // delta 4.0
                2 => Level::Hated,   // delta 4.0
                3 => Level::Loved,   // delta 0.0
                4 => Level::Hated,   // delta 3.0
            },
        };

        let means = hash_map! {
            1 => 2.0,
            2 => 2.0,
            3 => 2.0,
            4 => 1.0,
        };

        let scores = eclecticism(&users, &means, 1, 2);
        let ann = &scores["ann"];

        // Largest deltas first, equal deltas ordered by item id
        assert_eq!(ann.contrarian, vec![1, 2]);
    }
}
