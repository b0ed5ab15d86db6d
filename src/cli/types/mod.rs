//! Type-safe wrappers for fixture data.

pub mod date;
pub mod ids;
pub mod side;

pub use date::MatchDate;
pub use ids::FixtureId;
pub use side::Side;
