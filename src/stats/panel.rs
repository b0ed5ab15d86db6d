//! Reader for pre-aggregated panel exports.
//!
//! A panel row holds, for one side, `{prefix}_{stat_key}_{field}` columns
//! with `prefix` in `baseline`/`similar` and `field` in
//! `mean`/`std`/`cv_pct`/`n`. Values are read as-is; only `cv_pct` is
//! turned into a [`Confidence`].

use serde::{Deserialize, Serialize};

use super::aggregate::{confidence_from_cv, Confidence, ConfidencePolicy};
use super::metrics::{Metric, PerMetric};
use crate::cli::types::Side;
use crate::core::numeric::{try_float, try_int};
use crate::core::row::Row;

pub const SIDE_COLUMN: &str = "side";
pub const TEAM_NAME_COLUMN: &str = "team_name";
pub const POSITION_COLUMN: &str = "pos";
pub const POINTS_COLUMN: &str = "pts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelScope {
    /// Season-long numbers for the team.
    Baseline,
    /// Numbers restricted to the similar games.
    Similar,
}

impl PanelScope {
    pub fn prefix(&self) -> &'static str {
        match self {
            PanelScope::Baseline => "baseline",
            PanelScope::Similar => "similar",
        }
    }

    pub fn column(&self, metric: Metric, field: &str) -> String {
        format!("{}_{}_{}", self.prefix(), metric.stat_key(), field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelMetric {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub cv_pct: Option<f64>,
    pub n: Option<i64>,
    pub confidence: Confidence,
}

impl PanelMetric {
    pub fn read(row: &Row, scope: PanelScope, metric: Metric, policy: &ConfidencePolicy) -> Self {
        let float = |field: &str| row.get(&scope.column(metric, field)).and_then(try_float);
        let cv_pct = float("cv_pct");
        Self {
            mean: float("mean"),
            std: float("std"),
            cv_pct,
            n: row.get(&scope.column(metric, "n")).and_then(try_int),
            confidence: confidence_from_cv(cv_pct, policy),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSideStats {
    pub side: Side,
    pub team_name: Option<String>,
    /// League-table position.
    pub position: Option<i64>,
    pub points: Option<i64>,
    pub baseline: PerMetric<PanelMetric>,
    pub similar: PerMetric<PanelMetric>,
}

impl PanelSideStats {
    pub fn scope(&self, scope: PanelScope) -> &PerMetric<PanelMetric> {
        match scope {
            PanelScope::Baseline => &self.baseline,
            PanelScope::Similar => &self.similar,
        }
    }
}

/// The row whose `side` column names `side` (any case).
pub fn find_panel_row(rows: &[Row], side: Side) -> Option<&Row> {
    rows.iter().find(|r| {
        r.text(SIDE_COLUMN)
            .is_some_and(|s| s.eq_ignore_ascii_case(side.panel_label()))
    })
}

pub fn build_side_stats_from_panel(panel_row: &Row, side: Side) -> PanelSideStats {
    build_side_stats_from_panel_with(panel_row, side, &ConfidencePolicy::default())
}

pub fn build_side_stats_from_panel_with(
    panel_row: &Row,
    side: Side,
    policy: &ConfidencePolicy,
) -> PanelSideStats {
    PanelSideStats {
        side,
        team_name: panel_row.text(TEAM_NAME_COLUMN).map(str::to_string),
        position: panel_row.get(POSITION_COLUMN).and_then(try_int),
        points: panel_row.get(POINTS_COLUMN).and_then(try_int),
        baseline: PerMetric::from_fn(|m| PanelMetric::read(panel_row, PanelScope::Baseline, m, policy)),
        similar: PerMetric::from_fn(|m| PanelMetric::read(panel_row, PanelScope::Similar, m, policy)),
    }
}

/// Panel stats for both sides; a side without a row is `None`.
pub fn build_panel_stats(
    rows: &[Row],
    policy: &ConfidencePolicy,
) -> (Option<PanelSideStats>, Option<PanelSideStats>) {
    let read = |side| find_panel_row(rows, side).map(|r| build_side_stats_from_panel_with(r, side, policy));
    (read(Side::Home), read(Side::Away))
}
