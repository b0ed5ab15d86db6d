//! ID types for fixtures.

use crate::error::{FixtureError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for fixture IDs as issued by the upstream pipeline.
///
/// # Examples
///
/// ```rust
/// use fixture_stats::FixtureId;
///
/// let fixture_id: FixtureId = "537812".parse().unwrap();
/// assert_eq!(fixture_id.as_u64(), 537812);
/// assert_eq!(fixture_id.to_string(), "537812");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureId(pub u64);

impl FixtureId {
    /// Create a new FixtureId from a u64 value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether a raw `fixture_id` cell refers to this fixture.
    pub fn matches_cell(&self, raw: &str) -> bool {
        raw.trim().parse::<u64>().map(|v| v == self.0).unwrap_or(false)
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FixtureId {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
