//! Academic semesters.
//!
//! A semester is a season plus a four-digit year. Semesters are ordered
//! chronologically: by year, then `Spring < Summer < Fall < Winter` (the
//! winter session opens at the end of its calendar year).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::text::clean_text;

/// Season of an academic term, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Fall => 2,
            Self::Winter => 3,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One academic term, e.g. `Fall 2021`.
///
/// Serialized as its display form so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Semester {
    // Field order drives the derived chronological ordering.
    year: u16,
    season: Season,
}

impl Semester {
    /// Build a semester from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSemester`] if `year` is not a four-digit year.
    pub fn new(season: Season, year: u16) -> Result<Self, CoreError> {
        if !(1000..=9999).contains(&year) {
            return Err(CoreError::InvalidSemester(format!("{season} {year}")));
        }
        Ok(Self { year, season })
    }

    #[must_use]
    pub const fn season(self) -> Season {
        self.season
    }

    #[must_use]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// The term that follows this one, `None` past the last four-digit year.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self.season {
            Season::Winter => Self::new(Season::Spring, self.year.checked_add(1)?).ok(),
            season => Some(Self {
                year: self.year,
                season: Season::ALL[season.index() + 1],
            }),
        }
    }

    /// The term that precedes this one, `None` before the first four-digit year.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        match self.season {
            Season::Spring => Self::new(Season::Winter, self.year.checked_sub(1)?).ok(),
            season => Some(Self {
                year: self.year,
                season: Season::ALL[season.index() - 1],
            }),
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}

impl FromStr for Semester {
    type Err = CoreError;

    /// Accepts `"Fall 2021"` and `"2021 Fall"`; the season is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = clean_text(s);
        let invalid = || CoreError::InvalidSemester(s.to_string());

        let (first, second) = cleaned.split_once(' ').ok_or_else(invalid)?;
        let (season, year) = match (Season::parse(first), Season::parse(second)) {
            (Some(season), None) => (season, second),
            (None, Some(season)) => (season, first),
            _ => return Err(invalid()),
        };

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = year.parse::<u16>().map_err(|_| invalid())?;
        Self::new(season, year)
    }
}

impl TryFrom<String> for Semester {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Semester> for String {
    fn from(value: Semester) -> Self {
        value.to_string()
    }
}
