//! Rank-weighted statistics for a fixture, from its similar-games rows.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::{ConfidencePolicy, WeightedMetric};
use super::metrics::PerMetric;
use super::picks::{build_picks, HistoricalPick};
use crate::core::row::Row;


/// Aggregates for one side, computed over its found picks only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideStats {
    /// Picks that passed the `found` filter.
    pub rows_used: usize,
    pub metrics: PerMetric<WeightedMetric>,
}

impl SideStats {
    pub fn from_picks(picks: &[HistoricalPick], policy: &ConfidencePolicy) -> Self {
        let valid: Vec<&HistoricalPick> = picks.iter().filter(|p| p.found).collect();
        let weights: Vec<f64> = valid.iter().map(|p| p.weight).collect();

        let metrics = PerMetric::from_fn(|m| {
            let values: Vec<Option<f64>> = valid.iter().map(|p| *p.metrics.get(m)).collect();
            WeightedMetric::from_values(&values, &weights, policy)
        });

        Self {
            rows_used: valid.len(),
            metrics,
        }
    }

    pub fn has_data(&self) -> bool {
        self.rows_used > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureStatistics {
    /// Every row from the home perspective, found or not.
    pub home_picks: Vec<HistoricalPick>,
    pub away_picks: Vec<HistoricalPick>,
    pub home_stats: SideStats,
    pub away_stats: SideStats,
}

impl FixtureStatistics {
    /// Whether either side had at least one usable row.
    pub fn has_data(&self) -> bool {
        self.home_stats.has_data() || self.away_stats.has_data()
    }
}

/// [`build_fixture_statistics_with`] under the default confidence policy.
pub fn build_fixture_statistics(similar_rows: &[Row]) -> FixtureStatistics {
    build_fixture_statistics_with(similar_rows, &ConfidencePolicy::default())
}

/// Split rows into home/away picks and aggregate each side's found picks.
pub fn build_fixture_statistics_with(
    similar_rows: &[Row],
    policy: &ConfidencePolicy,
) -> FixtureStatistics {
    let (home_picks, away_picks) = build_picks(similar_rows);
    let home_stats = SideStats::from_picks(&home_picks, policy);
    let away_stats = SideStats::from_picks(&away_picks, policy);

    debug!(
        rows = similar_rows.len(),
        home_used = home_stats.rows_used,
        away_used = away_stats.rows_used,
        "built fixture statistics"
    );

    FixtureStatistics {
        home_picks,
        away_picks,
        home_stats,
        away_stats,
    }
}
