//! Command implementations for the fixture-stats CLI

pub mod batch_report;
pub mod common;
pub mod fixture_report;
pub mod name_match;
pub mod recent_matches;


pub use batch_report::{build_batch_reports, handle_batch_report, load_manifest, ManifestEntry};
pub use common::CommandContext;
pub use fixture_report::{
    build_fixture_report, handle_fixture_report, render_report_text, FixtureReport,
    FixtureReportParams, ReportInputs, SideReport,
};
pub use name_match::{handle_canon, handle_name_match, match_name};
pub use recent_matches::{
    handle_recent_matches, lookup_recent_matches, RecentMatches, RecentMatchesParams,
};
