//! Historical picks: previous matches used as supporting evidence.

use serde::{Deserialize, Serialize};

use super::metrics::{MetricColumns, MetricValues, ResolvedColumn};
use super::weighting::weight_from_rank;
use crate::cli::types::Side;
use crate::core::numeric::{parse_flag, parse_score, try_int};
use crate::core::row::{headers_of, Row};

pub const RANK_COLUMNS: &[&str] = &["rank"];
pub const FOUND_COLUMNS: &[&str] = &["fd_found", "found"];
pub const REASON_COLUMNS: &[&str] = &["fd_reason", "reason"];
pub const DATE_COLUMNS: &[&str] = &["utcDate_prev", "date_prev"];
pub const HOME_NAME_COLUMNS: &[&str] = &["home_prev"];
pub const AWAY_NAME_COLUMNS: &[&str] = &["away_prev"];
pub const SCORE_COLUMNS: &[&str] = &["score_fulltime_prev", "score_fulltime"];

/// One previous match, read from exactly one side's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPick {
    pub rank: Option<i64>,
    /// 1-based position within its list.
    pub position: usize,
    pub weight: f64,
    pub date: String,
    pub home_name: String,
    pub away_name: String,
    pub score: String,
    pub side: Side,
    pub metrics: MetricValues,
    pub found: bool,
    pub reason: String,
}

impl HistoricalPick {
    /// Rank for display; falls back to the list position when the rank is
    /// missing or not positive.
    pub fn display_rank(&self) -> i64 {
        match self.rank {
            Some(r) if r >= 1 => r,
            _ => self.position as i64,
        }
    }

    pub fn parsed_score(&self) -> Option<(u64, u64)> {
        parse_score(&self.score)
    }
}

/// Similar-games export columns, resolved once per source.
#[derive(Debug, Clone, Default)]
pub struct SimilarColumns {
    pub rank: ResolvedColumn,
    pub found: ResolvedColumn,
    pub reason: ResolvedColumn,
    pub date: ResolvedColumn,
    pub home_name: ResolvedColumn,
    pub away_name: ResolvedColumn,
    pub score: ResolvedColumn,
    pub metrics: MetricColumns,
}

impl SimilarColumns {
    pub fn resolve(rows: &[Row]) -> Self {
        let headers = headers_of(rows);
        Self {
            rank: ResolvedColumn::resolve(&headers, RANK_COLUMNS),
            found: ResolvedColumn::resolve(&headers, FOUND_COLUMNS),
            reason: ResolvedColumn::resolve(&headers, REASON_COLUMNS),
            date: ResolvedColumn::resolve(&headers, DATE_COLUMNS),
            home_name: ResolvedColumn::resolve(&headers, HOME_NAME_COLUMNS),
            away_name: ResolvedColumn::resolve(&headers, AWAY_NAME_COLUMNS),
            score: ResolvedColumn::resolve(&headers, SCORE_COLUMNS),
            metrics: MetricColumns::for_similar(&headers),
        }
    }

    /// Build the `side` pick for the row at 1-based `position`.
    pub fn pick(&self, row: &Row, position: usize, side: Side) -> HistoricalPick {
        let rank = self.rank.text(row).and_then(try_int);
        let score = self.score.text(row).unwrap_or_default().to_string();

        // A score that is present but garbled discredits the whole row.
        let weight = if !score.is_empty() && parse_score(&score).is_none() {
            0.0
        } else {
            weight_from_rank(rank)
        };

        HistoricalPick {
            rank,
            position,
            weight,
            date: self.date.text(row).unwrap_or_default().to_string(),
            home_name: self.home_name.text(row).unwrap_or_default().to_string(),
            away_name: self.away_name.text(row).unwrap_or_default().to_string(),
            score,
            side,
            metrics: self.metrics.read(row, side),
            found: self.found.text(row).map(parse_flag).unwrap_or(false),
            reason: self.reason.text(row).unwrap_or_default().to_string(),
        }
    }
}

/// Both perspectives of every row, in row order.
pub fn build_picks(rows: &[Row]) -> (Vec<HistoricalPick>, Vec<HistoricalPick>) {
    let cols = SimilarColumns::resolve(rows);
    let picks = |side| {
        rows.iter()
            .enumerate()
            .map(|(i, r)| cols.pick(r, i + 1, side))
            .collect::<Vec<_>>()
    };
    (picks(Side::Home), picks(Side::Away))
}
