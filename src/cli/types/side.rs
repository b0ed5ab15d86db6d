//! Fixture side (home / away) and its textual forms.

use crate::error::FixtureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The side of a fixture a statistic or query refers to.
///
/// The same physical match yields different "for" numbers depending on the
/// side it is read from: the home perspective reads the home team's columns,
/// the away perspective the away team's.
///
/// # Examples
///
/// ```rust
/// use fixture_stats::Side;
///
/// let side: Side = "Away".parse().unwrap();
/// assert_eq!(side, Side::Away);
/// assert_eq!(side.opposite(), Side::Home);
/// assert_eq!(side.panel_label(), "AWAY");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn opposite(&self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Value of the `side` column in panel exports.
    pub fn panel_label(&self) -> &'static str {
        match self {
            Side::Home => "HOME",
            Side::Away => "AWAY",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Home => "home",
            Side::Away => "away",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Side {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" | "h" | "casa" | "mandante" => Ok(Side::Home),
            "away" | "a" | "visitante" | "fora" => Ok(Side::Away),
            _ => Err(FixtureError::InvalidSide {
                value: s.to_string(),
            }),
        }
    }
}
