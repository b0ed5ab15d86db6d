//! Recent archive matches for one team

use serde::Serialize;

use super::common::{fmt_opt, print_json, CommandContext};
use crate::{
    cli::{AnchorArgs, ArchiveSource},
    core::row::Row,
    error::FixtureError,
    matching::{
        anchor::{candidate_pool, resolve_anchor, resolve_recent_matches, AnchorOverride},
        fuzzy::AnchorMatch,
        schema::resolve_schema,
    },
    stats::{metrics::Metric, picks::HistoricalPick},
    MatchDate, Result, Side,
};

use super::fixture_report::anchor_overrides;

/// Result of a `recent` lookup.
#[derive(Debug, Clone, Serialize)]
pub struct RecentMatches {
    pub team: String,
    pub side: Side,
    pub before: MatchDate,
    pub archive_schema: String,
    pub anchor: AnchorMatch,
    pub matches: Vec<HistoricalPick>,
}

/// Parameters of the `recent` command.
#[derive(Debug, Clone)]
pub struct RecentMatchesParams {
    pub archive: ArchiveSource,
    pub team: String,
    pub side: Side,
    pub before: MatchDate,
    pub limit: Option<usize>,
    /// Only the flags for `side` are used.
    pub anchors: AnchorArgs,
    pub as_json: bool,
}

/// Resolve `team` against the archive and list its matches on `side`
/// strictly before `before`. An explicit `anchor` skips the fuzzy search.
pub fn lookup_recent_matches(
    archive_rows: &[Row],
    team: &str,
    side: Side,
    before: MatchDate,
    limit: usize,
    anchor: Option<&AnchorOverride>,
    min_anchor_score: f64,
) -> Result<RecentMatches> {
    let schema = resolve_schema(archive_rows).ok_or(FixtureError::NoArchiveSchema)?;
    let pool = candidate_pool(archive_rows, &schema);
    let anchor = resolve_anchor(team, &pool, anchor, min_anchor_score);
    let matches = match &anchor.best_candidate {
        Some(c) => resolve_recent_matches(archive_rows, &schema, c, side, before, limit),
        None => Vec::new(),
    };

    Ok(RecentMatches {
        team: team.to_string(),
        side,
        before,
        archive_schema: schema.tag(),
        anchor,
        matches,
    })
}

pub fn render_recent_text(recent: &RecentMatches) -> String {
    let mut out = String::new();
    match &recent.anchor.best_candidate {
        Some(c) => out.push_str(&format!(
            "{} ({} matches before {}) -> \"{}\" score {:.2} [{}]\n",
            recent.team,
            recent.side,
            recent.before.to_br_string(),
            c,
            recent.anchor.score,
            recent.archive_schema
        )),
        None => {
            out.push_str(&format!("No archive team matches \"{}\"\n", recent.team));
            return out;
        }
    }
    if recent.matches.is_empty() {
        out.push_str("No matches found.\n");
    }
    for p in &recent.matches {
        out.push_str(&format!(
            "{:>2}. {}  {} {} {}",
            p.position,
            p.date,
            p.home_name,
            if p.score.is_empty() { "vs" } else { p.score.as_str() },
            p.away_name
        ));
        for metric in [Metric::Corners, Metric::Shots, Metric::Yellows] {
            out.push_str(&format!(
                "  {} {}",
                metric.stat_key(),
                fmt_opt(*p.metrics.get(metric), 0)
            ));
        }
        out.push('\n');
    }
    out
}

/// Handle the recent command
pub async fn handle_recent_matches(ctx: &CommandContext, params: RecentMatchesParams) -> Result<()> {
    if !params.archive.is_set() {
        return Err(FixtureError::Config {
            message: "recent needs --archive or --archive-url".to_string(),
        });
    }
    let rows = ctx.load_archive(&params.archive).await?;
    let (home_anchor, away_anchor) = anchor_overrides(&params.anchors);
    let anchor = match params.side {
        Side::Home => home_anchor,
        Side::Away => away_anchor,
    };
    let recent = lookup_recent_matches(
        &rows,
        &params.team,
        params.side,
        params.before,
        ctx.recent_limit(params.limit),
        anchor.as_ref(),
        ctx.settings.min_anchor_score,
    )?;

    if params.as_json {
        print_json(&recent)?;
    } else {
        print!("{}", render_recent_text(&recent));
    }
    Ok(())
}
