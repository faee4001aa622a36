// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Five point rating scale plus the NotRated sentinel ("has not watched").
/// NotRated carries no numeric value and is excluded from every aggregate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Level {
    Hated,
    Disliked,
    Okay,
    Liked,
    Loved,
    NotRated,
}

impl Level {
    /// Numeric value used in aggregates, None for NotRated.
    pub fn numeric_value(self) -> Option<i8> {
        match self {
            Level::Hated => Some(-2),
            Level::Disliked => Some(-1),
            Level::Okay => Some(0),
            Level::Liked => Some(1),
            Level::Loved => Some(2),
            Level::NotRated => None,
        }
    }

    /// Inverse of `numeric_value`, values outside [-2, 2] are clamped.
    pub fn from_numeric(value: i8) -> Self {
        match value {
            i8::MIN..=-2 => Level::Hated,
            -1 => Level::Disliked,
            0 => Level::Okay,
            1 => Level::Liked,
            2..=i8::MAX => Level::Loved,
        }
    }

    pub fn is_rated(self) -> bool {
        self != Level::NotRated
    }

    /// Wire form, the exact string persisted in the ratings table.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Hated => "hated",
            Level::Disliked => "disliked",
            Level::Okay => "okay",
            Level::Liked => "liked",
            Level::Loved => "loved",
            Level::NotRated => "not_rated",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hated" => Ok(Level::Hated),
            "disliked" => Ok(Level::Disliked),
            "okay" => Ok(Level::Okay),
            "liked" => Ok(Level::Liked),
            "loved" => Ok(Level::Loved),
            "not_rated" => Ok(Level::NotRated),
            other => Err(ErrorKind::UnknownLevel(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values() {
        assert_eq!(Level::Hated.numeric_value(), Some(-2));
        assert_eq!(Level::Disliked.numeric_value(), Some(-1));
        assert_eq!(Level::Okay.numeric_value(), Some(0));
        assert_eq!(Level::Liked.numeric_value(), Some(1));
        assert_eq!(Level::Loved.numeric_value(), Some(2));
        assert_eq!(Level::NotRated.numeric_value(), None);
    }

    #[test]
    fn wire_round_trip() {
        for level in &[
            Level::Hated,
            Level::Disliked,
            Level::Okay,
            Level::Liked,
            Level::Loved,
            Level::NotRated,
        ] {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), *level);
        }
    }

    #[test]
    fn unknown_level_is_an_error() {
        assert!("meh".parse::<Level>().is_err());
    }

    #[test]
    fn from_numeric_clamps() {
        assert_eq!(Level::from_numeric(-5), Level::Hated);
        assert_eq!(Level::from_numeric(-2), Level::Hated);
        assert_eq!(Level::from_numeric(0), Level::Okay);
        assert_eq!(Level::from_numeric(2), Level::Loved);
        assert_eq!(Level::from_numeric(5), Level::Loved);
    }
}
