//! Statistical aggregation over historical matches.
//!
//! Nothing here performs I/O; every function takes parsed rows and returns
//! plain data.

pub mod aggregate;
pub mod fixture;
pub mod meta;
pub mod metrics;
pub mod panel;
pub mod picks;
pub mod summary;
pub mod weighting;

pub use aggregate::{Confidence, ConfidencePolicy, Tier, WeightedMetric};
pub use fixture::{build_fixture_statistics, build_fixture_statistics_with, FixtureStatistics, SideStats};
pub use meta::FixtureMeta;
pub use metrics::{Metric, MetricValues, PerMetric};
pub use panel::{build_side_stats_from_panel, find_panel_row, PanelMetric, PanelScope, PanelSideStats};
pub use picks::HistoricalPick;
pub use summary::{build_goal_summary, GoalSummary};
pub use weighting::{weight_from_delta, weight_from_rank};
