#![allow(clippy::implicit_hasher)]

use crate::utils::common_rated_iter;
use controller::{Level, Ratings};
use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq)]
pub struct PairComparison<ItemId>
where
    ItemId: Hash + Eq,
{
    pub shared: HashSet<ItemId>,
    pub both_loved: HashSet<ItemId>,
    pub both_hated: HashSet<ItemId>,
    pub opposite_extremes: HashSet<ItemId>,
    pub disagreements: HashSet<ItemId>,
    /// Identical-level shared items over all shared items, 0 when there
    /// is no overlap at all (callers must present that case apart).
    pub agreement_ratio: f64,
    pub only_a: HashSet<ItemId>,
    pub only_b: HashSet<ItemId>,
}

impl<ItemId> PairComparison<ItemId>
where
    ItemId: Hash + Eq,
{
    pub fn has_overlap(&self) -> bool {
        !self.shared.is_empty()
    }
}

/// Compare the taste of two users over the items both rated. Each shared
/// item falls in exactly one bucket, checked in this order: both loved,
/// both hated, opposite extremes, two or more rungs apart; anything
/// closer counts as plain agreement and is only visible in the ratio.
pub fn compare_pair<ItemId>(a: &Ratings<ItemId>, b: &Ratings<ItemId>) -> PairComparison<ItemId>
where
    ItemId: Hash + Eq + Clone,
{
    let mut shared = HashSet::new();
    let mut both_loved = HashSet::new();
    let mut both_hated = HashSet::new();
    let mut opposite_extremes = HashSet::new();
    let mut disagreements = HashSet::new();
    let mut identical = 0;

    for (item_id, (level_a, level_b)) in common_rated_iter(a, b) {
        shared.insert(item_id.clone());

        if level_a == level_b {
            identical += 1;
        }

        match (level_a, level_b) {
            (Level::Loved, Level::Loved) => {
                both_loved.insert(item_id.clone());
            }

            (Level::Hated, Level::Hated) => {
                both_hated.insert(item_id.clone());
            }

            (Level::Loved, Level::Hated) | (Level::Hated, Level::Loved) => {
                opposite_extremes.insert(item_id.clone());
            }

            (level_a, level_b) => {
                if rung_distance(level_a, level_b) >= 2 {
                    disagreements.insert(item_id.clone());
                }
            }
        }
    }

    let agreement_ratio = if shared.is_empty() {
        0.0
    } else {
        f64::from(identical) / shared.len() as f64
    };

    PairComparison {
        agreement_ratio,
        shared,
        both_loved,
        both_hated,
        opposite_extremes,
        disagreements,
        only_a: exclusive_items(a, b),
        only_b: exclusive_items(b, a),
    }
}

fn rung_distance(a: Level, b: Level) -> i32 {
    let a = i32::from(a.numeric_value().unwrap_or(0));
    let b = i32::from(b.numeric_value().unwrap_or(0));
    (a - b).abs()
}

fn exclusive_items<ItemId>(of: &Ratings<ItemId>, other: &Ratings<ItemId>) -> HashSet<ItemId>
where
    ItemId: Hash + Eq + Clone,
{
    of.iter()
        .filter(|(item_id, level)| {
            level.is_rated() && !other.get(item_id).map_or(false, |l| l.is_rated())
        })
        .map(|(item_id, _)| item_id.clone())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripleComparison<ItemId>
where
    ItemId: Hash + Eq,
{
    pub a_only: HashSet<ItemId>,
    pub b_only: HashSet<ItemId>,
    pub c_only: HashSet<ItemId>,
    pub ab: HashSet<ItemId>,
    pub ac: HashSet<ItemId>,
    pub bc: HashSet<ItemId>,
    pub abc: HashSet<ItemId>,
}

impl<ItemId> TripleComparison<ItemId>
where
    ItemId: Hash + Eq,
{
    pub fn regions(&self) -> [(&'static str, &HashSet<ItemId>); 7] {
        [
            ("a", &self.a_only),
            ("b", &self.b_only),
            ("c", &self.c_only),
            ("ab", &self.ab),
            ("ac", &self.ac),
            ("bc", &self.bc),
            ("abc", &self.abc),
        ]
    }
}

/// Partition everything at least one of the three users rated into seven
/// disjoint regions keyed purely on who rated it, never on the value.
pub fn compare_triple<ItemId>(
    a: &Ratings<ItemId>,
    b: &Ratings<ItemId>,
    c: &Ratings<ItemId>,
) -> TripleComparison<ItemId>
where
    ItemId: Hash + Eq + Clone,
{
    let mut result = TripleComparison {
        a_only: HashSet::new(),
        b_only: HashSet::new(),
        c_only: HashSet::new(),
        ab: HashSet::new(),
        ac: HashSet::new(),
        bc: HashSet::new(),
        abc: HashSet::new(),
    };

    let mut union: HashSet<&ItemId> = HashSet::new();
    for ratings in &[a, b, c] {
        union.extend(
            ratings
                .iter()
                .filter(|(_, level)| level.is_rated())
                .map(|(item_id, _)| item_id),
        );
    }

    let rated = |ratings: &Ratings<ItemId>, item_id: &ItemId| {
        ratings.get(item_id).map_or(false, |level| level.is_rated())
    };

    for item_id in union {
        let region = match (rated(a, item_id), rated(b, item_id), rated(c, item_id)) {
            (true, false, false) => &mut result.a_only,
            (false, true, false) => &mut result.b_only,
            (false, false, true) => &mut result.c_only,
            (true, true, false) => &mut result.ab,
            (true, false, true) => &mut result.ac,
            (false, true, true) => &mut result.bc,
            (true, true, true) => &mut result.abc,
            // The union only holds items rated by at least one user
            (false, false, false) => continue,
        };

        region.insert(item_id.clone());
    }

    result
}
