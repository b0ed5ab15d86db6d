//! Fixture Statistics Library
//!
//! Weighted pre-match indicators for football fixtures, computed from
//! heterogeneous historical CSV exports, plus the team-name matching that
//! links those exports to an independent league archive.
//!
//! ## Features
//!
//! - **Weighted Aggregation**: rank-weighted means with a CV-based confidence model
//! - **Dual Panel Reader**: pre-aggregated baseline/similar figures, passed through
//! - **Schema Resolution**: date/home/away discovery for unknown archive layouts
//! - **Name Canonicalization**: accent-, case- and stopword-insensitive team names
//! - **Fuzzy Matching**: substring bonus plus bigram Dice scoring
//! - **Recent Matches**: a team's latest archive games before a fixture date
//!
//! ## Quick Start
//!
//! ```rust
//! use fixture_stats::{core::Row, stats::build_fixture_statistics};
//!
//! let rows = vec![
//!     Row::from_pairs([("rank", "1"), ("fd_found", "true"), ("fd_FTHG", "2")]),
//!     Row::from_pairs([("rank", "2"), ("fd_found", "true"), ("fd_FTHG", "1")]),
//! ];
//! let stats = build_fixture_statistics(&rows);
//! let gf = stats.home_stats.metrics.gf.weighted_mean.unwrap();
//! assert!((gf - 5.0 / 3.0).abs() < 1e-9);
//! ```
//!
//! ```rust
//! use fixture_stats::matching::{best_match, canonicalize};
//!
//! assert_eq!(canonicalize("São Paulo FC"), canonicalize("sao paulo"));
//!
//! let m = best_match("Real Madrid CF", &["real madrid", "barcelona"]);
//! assert_eq!(m.best_candidate.unwrap().as_str(), "real madrid");
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a settings file without passing `--config` every time:
//! ```bash
//! export FIXTURE_STATS_CONFIG=~/fixture-stats.json
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod matching;
pub mod stats;

// Re-export commonly used types
pub use cli::types::{FixtureId, MatchDate, Side};
pub use commands::fixture_report::{build_fixture_report, FixtureReport, ReportInputs};
pub use core::{config::Settings, row::Row};
pub use error::{FixtureError, Result};

pub const CONFIG_ENV_VAR: &str = "FIXTURE_STATS_CONFIG";
