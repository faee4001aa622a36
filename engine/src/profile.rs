use crate::score::LevelCounts;
use controller::Level;
use std::cmp::Ordering;

/// Sort keys a profile can be viewed under, each a fixed comparator
/// rather than a runtime string lookup.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SortKey {
    Title,
    Year,
    Director,
    Genre,
    RatingLevel,
    Popularity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRow<ItemId> {
    pub item_id: ItemId,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub level: Level,
    /// Total stored rating rows for the item, any level.
    pub popularity: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary<ItemId> {
    pub rows: Vec<ProfileRow<ItemId>>,
    pub counts: LevelCounts,
}

impl<ItemId> ProfileSummary<ItemId> {
    /// Whole-percent share of one level among this user's rated rows.
    pub fn percent(&self, level: Level) -> u32 {
        let rated = self.counts.rated();
        if rated == 0 {
            return 0;
        }

        (self.counts.of(level) as f64 / rated as f64 * 100.0).round() as u32
    }
}

pub fn sort_profile<ItemId>(rows: &mut Vec<ProfileRow<ItemId>>, key: SortKey) {
    rows.sort_by(|a, b| compare_rows(a, b, key));
}

fn compare_rows<ItemId>(a: &ProfileRow<ItemId>, b: &ProfileRow<ItemId>, key: SortKey) -> Ordering {
    let order = match key {
        SortKey::Title => Ordering::Equal,
        SortKey::Year => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
        SortKey::Director => lowercase(&a.director).cmp(&lowercase(&b.director)),
        SortKey::Genre => lowercase(&a.genre).cmp(&lowercase(&b.genre)),
        SortKey::RatingLevel => display_rank(a.level).cmp(&display_rank(b.level)),
        SortKey::Popularity => b.popularity.cmp(&a.popularity),
    };

    order.then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}

fn lowercase(field: &Option<String>) -> String {
    field.as_deref().unwrap_or_default().to_lowercase()
}

// Best ratings first when viewing by level
fn display_rank(level: Level) -> u8 {
    match level {
        Level::Loved => 0,
        Level::Liked => 1,
        Level::Okay => 2,
        Level::Disliked => 3,
        Level::Hated => 4,
        Level::NotRated => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::LevelCounts;

    fn row(title: &str, year: Option<i32>, level: Level, popularity: usize) -> ProfileRow<i32> {
        ProfileRow {
            item_id: 0,
            title: title.to_owned(),
            year,
            director: None,
            genre: None,
            level,
            popularity,
        }
    }

    fn titles(rows: &[ProfileRow<i32>]) -> Vec<&str> {
        rows.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn sort_by_title_ignores_case() {
        let mut rows = vec![
            row("zodiac", None, Level::Okay, 0),
            row("Alien", None, Level::Okay, 0),
            row("heat", None, Level::Okay, 0),
        ];

        sort_profile(&mut rows, SortKey::Title);
        assert_eq!(titles(&rows), vec!["Alien", "heat", "zodiac"]);
    }

    #[test]
    fn sort_by_rating_puts_loved_first() {
        let mut rows = vec![
            row("Meh", None, Level::Okay, 0),
            row("Bad", None, Level::Hated, 0),
            row("Great", None, Level::Loved, 0),
        ];

        sort_profile(&mut rows, SortKey::RatingLevel);
        assert_eq!(titles(&rows), vec!["Great", "Meh", "Bad"]);
    }

    #[test]
    fn sort_by_popularity_is_descending_with_title_ties() {
        let mut rows = vec![
            row("Beta", None, Level::Okay, 3),
            row("Alpha", None, Level::Okay, 3),
            row("Hit", None, Level::Okay, 10),
        ];

        sort_profile(&mut rows, SortKey::Popularity);
        assert_eq!(titles(&rows), vec!["Hit", "Alpha", "Beta"]);
    }

    #[test]
    fn sort_by_year_treats_missing_year_as_oldest() {
        let mut rows = vec![
            row("New", Some(2019), Level::Okay, 0),
            row("Undated", None, Level::Okay, 0),
            row("Old", Some(1950), Level::Okay, 0),
        ];

        sort_profile(&mut rows, SortKey::Year);
        assert_eq!(titles(&rows), vec!["Undated", "Old", "New"]);
    }

    #[test]
    fn percentages_round_to_whole_numbers() {
        let summary = ProfileSummary::<i32> {
            rows: vec![],
            counts: LevelCounts {
                loved: 2,
                liked: 1,
                okay: 0,
                disliked: 0,
                hated: 0,
                not_rated: 4,
            },
        };

        assert_eq!(summary.percent(Level::Loved), 67);
        assert_eq!(summary.percent(Level::Liked), 33);
        assert_eq!(summary.percent(Level::Hated), 0);
    }

    #[test]
    fn percentages_of_empty_profile_are_zero() {
        let summary = ProfileSummary::<i32> {
            rows: vec![],
            counts: LevelCounts::default(),
        };

        assert_eq!(summary.percent(Level::Loved), 0);
    }
}
