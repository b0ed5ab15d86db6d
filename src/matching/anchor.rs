//! Mapping fixture teams onto a league archive and pulling their recent
//! matches.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::canonical::{canonicalize, CanonicalName};
use super::fuzzy::{best_canonical_match, AnchorMatch};
use super::schema::ArchiveSchema;
use crate::cli::types::{MatchDate, Side};
use crate::core::row::{headers_of, Row};
use crate::stats::metrics::MetricColumns;
use crate::stats::picks::HistoricalPick;


/// An upstream-supplied canonical name for a team, trusted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorOverride {
    pub canonical: String,
    pub score: Option<f64>,
}

/// Distinct canonical team names of the archive's home and away columns,
/// in first-seen order.
pub fn candidate_pool(archive_rows: &[Row], schema: &ArchiveSchema) -> Vec<CanonicalName> {
    let mut pool: Vec<CanonicalName> = Vec::new();
    for row in archive_rows {
        for col in [&schema.home, &schema.away] {
            let Some(name) = row.text(col) else { continue };
            let canon = canonicalize(name);
            if !canon.is_empty() && !pool.contains(&canon) {
                pool.push(canon);
            }
        }
    }
    pool
}

/// Resolve one fixture team to an archive name.
///
/// An override wins outright (score defaults to 1.0). Otherwise the seed is
/// fuzzy-matched against `pool`; weak matches are logged but still returned.
pub fn resolve_anchor(
    seed: &str,
    pool: &[CanonicalName],
    explicit: Option<&AnchorOverride>,
    min_score: f64,
) -> AnchorMatch {
    if let Some(o) = explicit {
        return AnchorMatch {
            canonical_seed: canonicalize(seed),
            best_candidate: Some(CanonicalName::verbatim(o.canonical.clone())),
            score: o.score.unwrap_or(1.0),
        };
    }

    let m = best_canonical_match(&canonicalize(seed), pool);
    match &m.best_candidate {
        Some(c) if m.score < min_score => {
            warn!(seed, candidate = %c, score = m.score, "weak anchor match");
        }
        Some(c) => debug!(seed, candidate = %c, score = m.score, "anchor resolved"),
        None => warn!(seed, pool = pool.len(), "no anchor candidate"),
    }
    m
}

/// The `limit` most recent archive matches strictly before `before_date`
/// in which `anchor` played on `side`, newest first.
///
/// Rows whose date cannot be parsed are skipped. Picks carry rank =
/// position, weight 0 and `found = true`.
pub fn resolve_recent_matches(
    archive_rows: &[Row],
    schema: &ArchiveSchema,
    anchor: &CanonicalName,
    side: Side,
    before_date: MatchDate,
    limit: usize,
) -> Vec<HistoricalPick> {
    let anchor = canonicalize(anchor.as_str());
    if anchor.is_empty() || limit == 0 {
        return Vec::new();
    }

    let team_col = match side {
        Side::Home => &schema.home,
        Side::Away => &schema.away,
    };

    let mut skipped = 0usize;
    let mut hits: Vec<(MatchDate, &Row)> = Vec::new();
    for row in archive_rows {
        let is_team = row
            .text(team_col)
            .is_some_and(|name| canonicalize(name) == anchor);
        if !is_team {
            continue;
        }
        match row.text(&schema.date).and_then(MatchDate::from_cell) {
            Some(date) if date < before_date => hits.push((date, row)),
            Some(_) => {}
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(team = %anchor, skipped, "archive rows with unreadable dates skipped");
    }

    // stable: equal dates keep archive order
    hits.sort_by(|a, b| b.0.cmp(&a.0));
    hits.truncate(limit);

    let columns = MetricColumns::for_archive(&headers_of(archive_rows));
    hits.into_iter()
        .enumerate()
        .map(|(i, (date, row))| {
            let home_goals = columns.read(row, Side::Home).gf;
            let away_goals = columns.read(row, Side::Away).gf;
            let score = match (home_goals, away_goals) {
                (Some(h), Some(a)) => format!("{}-{}", h as i64, a as i64),
                _ => String::new(),
            };
            HistoricalPick {
                rank: Some(i as i64 + 1),
                position: i + 1,
                weight: 0.0,
                date: date.to_string(),
                home_name: row.text(&schema.home).unwrap_or_default().to_string(),
                away_name: row.text(&schema.away).unwrap_or_default().to_string(),
                score,
                side,
                metrics: columns.read(row, side),
                found: true,
                reason: String::new(),
            }
        })
        .collect()
}
