#![allow(clippy::implicit_hasher)]

use controller::{Level, Ratings};
use num_traits::float::Float;
use std::{hash::Hash, ops::AddAssign};

/// Tally of every stored level for one item, NotRated counted apart so it
/// never lands in the denominator of the mean.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct LevelCounts {
    pub loved: usize,
    pub liked: usize,
    pub okay: usize,
    pub disliked: usize,
    pub hated: usize,
    pub not_rated: usize,
}

impl LevelCounts {
    pub fn tally<'a, I>(levels: I) -> Self
    where
        I: IntoIterator<Item = &'a Level>,
    {
        let mut counts = Self::default();
        for level in levels {
            match level {
                Level::Loved => counts.loved += 1,
                Level::Liked => counts.liked += 1,
                Level::Okay => counts.okay += 1,
                Level::Disliked => counts.disliked += 1,
                Level::Hated => counts.hated += 1,
                Level::NotRated => counts.not_rated += 1,
            }
        }

        counts
    }

    pub fn of(&self, level: Level) -> usize {
        match level {
            Level::Loved => self.loved,
            Level::Liked => self.liked,
            Level::Okay => self.okay,
            Level::Disliked => self.disliked,
            Level::Hated => self.hated,
            Level::NotRated => self.not_rated,
        }
    }

    pub fn rated(&self) -> usize {
        self.loved + self.liked + self.okay + self.disliked + self.hated
    }

    pub fn total(&self) -> usize {
        self.rated() + self.not_rated
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemScore {
    pub mean: f64,
    pub display_score: f64,
    pub rating_count: usize,
    pub counts: LevelCounts,
}

/// Aggregate the stored ratings of one item. An item nobody has rated
/// scores 0 and therefore sorts at the bottom, not apart.
pub fn item_score<UserId>(ratings: &Ratings<UserId>) -> ItemScore
where
    UserId: Hash + Eq,
{
    let counts = LevelCounts::tally(ratings.values());
    let values = ratings
        .values()
        .filter_map(|level| level.numeric_value().map(f64::from));

    match mean(values) {
        Some(mean) => ItemScore {
            mean,
            display_score: display_score(mean),
            rating_count: counts.rated(),
            counts,
        },

        None => ItemScore {
            mean: 0.0,
            display_score: 0.0,
            rating_count: 0,
            counts,
        },
    }
}

/// Rescale a mean in [-2, 2] to [0, 100], exact at both ends.
pub fn display_score(mean: f64) -> f64 {
    ((mean + 2.0) / 4.0) * 100.0
}

/// Population standard deviation of an item's rated values; undefined
/// (not zero) for fewer than two rated values.
pub fn divisiveness<UserId>(ratings: &Ratings<UserId>) -> Option<f64>
where
    UserId: Hash + Eq,
{
    let values: Vec<f64> = ratings
        .values()
        .filter_map(|level| level.numeric_value().map(f64::from))
        .collect();

    if values.len() < 2 {
        return None;
    }

    population_std_dev(values.iter().copied())
}

pub(crate) fn mean<V, I>(values: I) -> Option<V>
where
    V: Float + AddAssign,
    I: Iterator<Item = V>,
{
    let mut sum = None;
    let mut n = 0;

    for x in values {
        *sum.get_or_insert_with(V::zero) += x;
        n += 1;
    }

    Some(sum? / V::from(n)?)
}

pub(crate) fn population_std_dev<V, I>(values: I) -> Option<V>
where
    V: Float + AddAssign,
    I: Iterator<Item = V> + Clone,
{
    let mean = mean(values.clone())?;

    let mut dev = None;
    let mut n = 0;

    for x in values {
        *dev.get_or_insert_with(V::zero) += (x - mean).powi(2);
        n += 1;
    }

    Some((dev? / V::from(n)?).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::*;
    use common_macros::hash_map;

    #[test]
    fn score_of_mixed_ratings() {
        let ratings = hash_map! {
            1 => Level::Loved,
            2 => Level::Liked,
            3 => Level::Liked,
            4 => Level::Okay,
        };

        let score = item_score(&ratings);

        assert_eq!(score.rating_count, 4);
        assert_approx_eq!(score.mean, 1.0);
        assert_approx_eq!(score.display_score, 75.0);
        assert_eq!(score.counts.loved, 1);
        assert_eq!(score.counts.liked, 2);
        assert_eq!(score.counts.okay, 1);
    }

    #[test]
    fn score_of_no_ratings_is_zero() {
        let ratings: Ratings<i32> = hash_map! {};
        let score = item_score(&ratings);

        assert_eq!(score.rating_count, 0);
        assert_approx_eq!(score.mean, 0.0);
        assert_approx_eq!(score.display_score, 0.0);
    }

    #[test]
    fn not_rated_never_reaches_the_mean() {
        let ratings = hash_map! {
            1 => Level::Loved,
            2 => Level::NotRated,
            3 => Level::NotRated,
        };

        let score = item_score(&ratings);

        assert_eq!(score.rating_count, 1);
        assert_eq!(score.counts.not_rated, 2);
        assert_approx_eq!(score.mean, 2.0);
        assert_approx_eq!(score.display_score, 100.0);
    }

    #[test]
    fn only_not_rated_counts_as_no_data() {
        let ratings = hash_map! {
            1 => Level::NotRated,
        };

        let score = item_score(&ratings);

        assert_eq!(score.rating_count, 0);
        assert_approx_eq!(score.display_score, 0.0);
    }

    #[test]
    fn display_score_stays_in_bounds() {
        let all_hated = hash_map! { 1 => Level::Hated, 2 => Level::Hated };
        let all_loved = hash_map! { 1 => Level::Loved, 2 => Level::Loved };

        assert_approx_eq!(item_score(&all_hated).display_score, 0.0);
        assert_approx_eq!(item_score(&all_loved).display_score, 100.0);
    }

    #[test]
    fn score_is_idempotent() {
        let ratings = hash_map! {
            1 => Level::Loved,
            2 => Level::Hated,
            3 => Level::Okay,
        };

        assert_eq!(item_score(&ratings), item_score(&ratings));
    }

    #[test]
    fn divisiveness_of_extremes() {
        let ratings = hash_map! {
            1 => Level::Loved,
            2 => Level::Hated,
        };

        assert_approx_eq!(divisiveness(&ratings).unwrap(), 2.0);
    }

    #[test]
    fn divisiveness_of_unanimous_ratings_is_zero() {
        let ratings = hash_map! {
            1 => Level::Liked,
            2 => Level::Liked,
            3 => Level::Liked,
        };

        assert_approx_eq!(divisiveness(&ratings).unwrap(), 0.0);
    }

    #[test]
    fn divisiveness_needs_two_rated_values() {
        let single = hash_map! { 1 => Level::Loved };
        let padded = hash_map! { 1 => Level::Loved, 2 => Level::NotRated };

        assert!(divisiveness(&single).is_none());
        assert!(divisiveness(&padded).is_none());
    }
}
