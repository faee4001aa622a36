use crate::score::ItemScore;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem<Id> {
    pub id: Id,
    pub title: String,
    pub score: ItemScore,
}

/// Descending by display score, ties ascending by title. The order only
/// depends on the input, re-sorting ranked output is a no-op.
pub fn rank_items<Id>(mut items: Vec<RankedItem<Id>>) -> Vec<RankedItem<Id>> {
    items.sort_by(|a, b| {
        score_order(a.score.display_score, &a.title, b.score.display_score, &b.title)
    });

    items
}

// Display scores live in [0, 100], partial_cmp can't observe a NaN here
fn score_order(a_score: f64, a_title: &str, b_score: f64, b_title: &str) -> Ordering {
    b_score
        .partial_cmp(&a_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a_title.cmp(b_title))
}

pub fn decade_of(year: i32) -> i32 {
    (year / 10) * 10
}

/// Bucket items by decade and rank inside each bucket; most recent decade
/// first. Items without a year are skipped rather than rejected.
pub fn rank_by_decade<Id>(items: Vec<(Option<i32>, RankedItem<Id>)>) -> Vec<(i32, Vec<RankedItem<Id>>)> {
    let mut decades: BTreeMap<i32, Vec<RankedItem<Id>>> = BTreeMap::new();

    for (year, item) in items {
        if let Some(year) = year {
            decades.entry(decade_of(year)).or_default().push(item);
        }
    }

    decades
        .into_iter()
        .rev()
        .map(|(decade, items)| (decade, rank_items(items)))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivisiveItem<Id> {
    pub id: Id,
    pub title: String,
    pub spread: f64,
}

/// Descending by spread, ties ascending by title. Items whose spread is
/// undefined (fewer than two ratings) must not be passed in at all.
pub fn rank_divisive<Id>(mut items: Vec<DivisiveItem<Id>>) -> Vec<DivisiveItem<Id>> {
    items.sort_by(|a, b| {
        b.spread
            .partial_cmp(&a.spread)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.title.cmp(&b.title))
    });

    items
}

/// The order a user is prompted to rate what they haven't yet: most rated
/// rows first, title as tie-break. `seen` holds every item the user has a
/// stored row for, including NotRated ones, so skipped items don't come
/// back around.
pub fn next_up<Id>(items: Vec<(Id, String, usize)>, seen: &HashSet<Id>) -> Vec<(Id, String, usize)>
where
    Id: Hash + Eq,
{
    let mut pending: Vec<_> = items
        .into_iter()
        .filter(|(id, _, _)| !seen.contains(id))
        .collect();

    pending.sort_by(|(_, a_title, a_count), (_, b_title, b_count)| {
        b_count.cmp(a_count).then_with(|| a_title.cmp(b_title))
    });

    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score;
    use common_macros::{hash_map, hash_set};
    use controller::Level;

    fn ranked(id: i32, title: &str, levels: &[Level]) -> RankedItem<i32> {
        let ratings = levels
            .iter()
            .enumerate()
            .map(|(user, level)| (user as i32, *level))
            .collect();

        RankedItem {
            id,
            title: title.to_owned(),
            score: score::item_score(&ratings),
        }
    }

    #[test]
    fn ranking_is_descending_by_display_score() {
        let items = vec![
            ranked(1, "Heat", &[Level::Okay]),
            ranked(2, "Alien", &[Level::Loved]),
            ranked(3, "Congo", &[Level::Hated]),
        ];

        let titles: Vec<_> = rank_items(items).into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["Alien", "Heat", "Congo"]);
    }

    #[test]
    fn ties_break_alphabetically() {
        let items = vec![
            ranked(1, "Beta", &[Level::Okay]),
            ranked(2, "Alpha", &[Level::Okay]),
        ];

        let ranked_items = rank_items(items);

        assert_eq!(ranked_items[0].title, "Alpha");
        assert_eq!(ranked_items[1].title, "Beta");
    }

    #[test]
    fn unrated_items_sink_to_the_bottom() {
        let items = vec![
            ranked(1, "Unseen", &[]),
            ranked(2, "Universally Hated", &[Level::Hated, Level::Hated]),
            ranked(3, "Fine", &[Level::Okay]),
        ];

        let titles: Vec<_> = rank_items(items).into_iter().map(|i| i.title).collect();
        // Zero data scores 0, exactly like unanimous hate, and ties on title
        assert_eq!(titles, vec!["Fine", "Universally Hated", "Unseen"]);
    }

    #[test]
    fn decade_labels() {
        assert_eq!(decade_of(2017), 2010);
        assert_eq!(decade_of(2010), 2010);
        assert_eq!(decade_of(1999), 1990);
    }

    #[test]
    fn decades_are_grouped_and_ordered_recent_first() {
        let items = vec![
            (Some(1994), ranked(1, "Speed", &[Level::Liked])),
            (Some(2017), ranked(2, "Dunkirk", &[Level::Loved])),
            (Some(2015), ranked(3, "Creed", &[Level::Okay])),
            (None, ranked(4, "Lost Reel", &[Level::Loved])),
        ];

        let grouped = rank_by_decade(items);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, 2010);
        assert_eq!(grouped[1].0, 1990);

        let recent: Vec<_> = grouped[0].1.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(recent, vec!["Dunkirk", "Creed"]);
    }

    #[test]
    fn divisive_ranking_orders_by_spread_then_title() {
        let items = vec![
            DivisiveItem { id: 1, title: "Calm".to_owned(), spread: 0.5 },
            DivisiveItem { id: 2, title: "Beta".to_owned(), spread: 2.0 },
            DivisiveItem { id: 3, title: "Alpha".to_owned(), spread: 2.0 },
        ];

        let titles: Vec<_> = rank_divisive(items).into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["Alpha", "Beta", "Calm"]);
    }

    #[test]
    fn next_up_skips_seen_and_orders_by_popularity() {
        let items = vec![
            (1, "Alien".to_owned(), 4),
            (2, "Heat".to_owned(), 9),
            (3, "Congo".to_owned(), 9),
            (4, "Rated Already".to_owned(), 12),
        ];

        let seen = hash_set! { 4 };
        let pending = next_up(items, &seen);

        let titles: Vec<_> = pending.iter().map(|(_, title, _)| title.as_str()).collect();
        assert_eq!(titles, vec!["Congo", "Heat", "Alien"]);
    }

    #[test]
    fn next_up_counts_every_stored_row_as_seen() {
        let ratings = hash_map! {
            1 => Level::NotRated,
        };

        let seen: HashSet<_> = ratings.keys().copied().collect();
        let pending = next_up(vec![(1, "Skipped".to_owned(), 3)], &seen);

        assert!(pending.is_empty());
    }
}
