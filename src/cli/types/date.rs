//! Calendar date of a fixture or historical match.

use crate::core::numeric::parse_match_date;
use crate::error::{FixtureError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for match dates.
///
/// Accepts the same spellings the data sources use (ISO dates and datetimes,
/// `DD/MM/YYYY`, `DD/MM/YY`); always displays as ISO.
///
/// # Examples
///
/// ```rust
/// use fixture_stats::MatchDate;
///
/// let date: MatchDate = "01/03/2024".parse().unwrap();
/// assert_eq!(date.to_string(), "2024-03-01");
/// assert_eq!(date.to_br_string(), "01/03/2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchDate(pub NaiveDate);

impl MatchDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Day-first rendering used by the Brazilian-facing listings.
    pub fn to_br_string(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }

    /// Lenient constructor for raw cells: `None` instead of an error.
    pub fn from_cell(raw: &str) -> Option<Self> {
        parse_match_date(raw).map(Self)
    }
}

impl fmt::Display for MatchDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for MatchDate {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_cell(s).ok_or_else(|| FixtureError::InvalidDate {
            value: s.to_string(),
        })
    }
}

impl From<NaiveDate> for MatchDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
