//! Fixture report command implementation

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::common::{fmt_confidence, fmt_opt, print_json, CommandContext};
use crate::{
    cli::{types::FixtureId, AnchorArgs, ArchiveSource},
    core::{
        cache::write_string,
        config::Settings,
        row::Row,
        source::{base_key, load_csv, load_optional_csv, rows_for_fixture},
    },
    matching::{
        anchor::{candidate_pool, resolve_anchor, resolve_recent_matches, AnchorOverride},
        display::{clean_seed, estimate_team_position, pick_display_name, teams_from_base_key},
        fuzzy::AnchorMatch,
        schema::resolve_schema,
    },
    stats::{
        fixture::{build_fixture_statistics_with, FixtureStatistics, SideStats},
        meta::FixtureMeta,
        metrics::Metric,
        panel::{build_panel_stats, PanelSideStats},
        picks::HistoricalPick,
        summary::{build_goal_summary_with, GoalSummary},
    },
    MatchDate, Result, Side,
};

/// Everything a report is computed from. Rows are already parsed.
#[derive(Debug, Clone, Default)]
pub struct ReportInputs {
    pub similar_rows: Vec<Row>,
    pub panel_rows: Vec<Row>,
    pub archive_rows: Vec<Row>,
    /// Export file base key, used to recover team names.
    pub base_key: Option<String>,
    pub home_seed: Option<String>,
    pub away_seed: Option<String>,
    pub fixture_date: Option<MatchDate>,
    pub home_anchor: Option<AnchorOverride>,
    pub away_anchor: Option<AnchorOverride>,
    /// Overrides `Settings::recent_limit`.
    pub limit: Option<usize>,
}

impl ReportInputs {
    fn seed(&self, side: Side) -> Option<&str> {
        match side {
            Side::Home => self.home_seed.as_deref(),
            Side::Away => self.away_seed.as_deref(),
        }
    }

    fn anchor_override(&self, side: Side) -> Option<&AnchorOverride> {
        match side {
            Side::Home => self.home_anchor.as_ref(),
            Side::Away => self.away_anchor.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideReport {
    pub side: Side,
    pub display_name: String,
    /// Panel position, else the mode of the similar rows' positions.
    pub position: Option<i64>,
    pub points: Option<i64>,
    pub panel: Option<PanelSideStats>,
    pub anchor: Option<AnchorMatch>,
    pub recent_matches: Vec<HistoricalPick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureReport {
    pub meta: FixtureMeta,
    pub home: SideReport,
    pub away: SideReport,
    pub statistics: FixtureStatistics,
    pub goal_summary: GoalSummary,
    pub archive_schema: Option<String>,
    pub archive_low_confidence: bool,
}

impl FixtureReport {
    pub fn side(&self, side: Side) -> &SideReport {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// Compute a fixture report. Pure: no I/O, deterministic for given inputs.
pub fn build_fixture_report(inputs: &ReportInputs, settings: &Settings) -> FixtureReport {
    let policy = &settings.policy;
    let meta = FixtureMeta::from_sources(
        &inputs.similar_rows,
        &inputs.panel_rows,
        inputs.base_key.as_deref(),
    );
    let statistics = build_fixture_statistics_with(&inputs.similar_rows, policy);
    let goal_summary = build_goal_summary_with(&inputs.similar_rows, policy);
    let (home_panel, away_panel) = build_panel_stats(&inputs.panel_rows, policy);

    let schema = if inputs.archive_rows.is_empty() {
        None
    } else {
        let s = resolve_schema(&inputs.archive_rows);
        if s.is_none() {
            warn!("league archive has too few columns, recent matches skipped");
        }
        s
    };
    let pool = schema
        .as_ref()
        .map(|s| candidate_pool(&inputs.archive_rows, s))
        .unwrap_or_default();
    let fixture_date = inputs.fixture_date.or(meta.date);
    let limit = inputs.limit.unwrap_or(settings.recent_limit);
    let base_teams = inputs.base_key.as_deref().and_then(teams_from_base_key);

    let side_report = |side: Side, panel: Option<PanelSideStats>| {
        let fallback = base_teams.as_ref().map(|(h, a)| match side {
            Side::Home => h.as_str(),
            Side::Away => a.as_str(),
        });
        let seed = match inputs.seed(side) {
            Some(s) => s.trim().to_string(),
            None => clean_seed(meta.team_name(side), fallback),
        };
        let display_name = pick_display_name(&seed, &inputs.similar_rows);

        let position = panel
            .as_ref()
            .and_then(|p| p.position)
            .or_else(|| estimate_team_position(&inputs.similar_rows, &display_name));
        let points = panel.as_ref().and_then(|p| p.points);

        let (anchor, recent_matches) = match &schema {
            Some(schema) => {
                let anchor = resolve_anchor(
                    &display_name,
                    &pool,
                    inputs.anchor_override(side),
                    settings.min_anchor_score,
                );
                let recent = match (&anchor.best_candidate, fixture_date) {
                    (Some(c), Some(date)) => resolve_recent_matches(
                        &inputs.archive_rows,
                        schema,
                        c,
                        side,
                        date,
                        limit,
                    ),
                    (Some(_), None) => {
                        warn!(%side, "no fixture date, recent matches skipped");
                        Vec::new()
                    }
                    (None, _) => Vec::new(),
                };
                (Some(anchor), recent)
            }
            None => (None, Vec::new()),
        };

        SideReport {
            side,
            display_name,
            position,
            points,
            panel,
            anchor,
            recent_matches,
        }
    };

    let home = side_report(Side::Home, home_panel);
    let away = side_report(Side::Away, away_panel);

    debug!(
        home = %home.display_name,
        away = %away.display_name,
        "fixture report built"
    );

    FixtureReport {
        meta,
        home,
        away,
        statistics,
        goal_summary,
        archive_schema: schema.as_ref().map(|s| s.tag()),
        archive_low_confidence: schema.as_ref().is_some_and(|s| s.is_low_confidence()),
    }
}

fn render_side_stats(out: &mut String, title: &str, stats: &SideStats) {
    out.push_str(&format!("{} ({} matched rows)\n", title, stats.rows_used));
    for (metric, m) in stats.metrics.iter() {
        out.push_str(&format!(
            "  {:<16} weighted {:>6}  simple {:>6}  {}\n",
            metric.label(),
            fmt_opt(m.weighted_mean, 2),
            fmt_opt(m.simple_mean, 2),
            fmt_confidence(&m.confidence)
        ));
    }
}

fn render_recent(out: &mut String, side: &SideReport) {
    let Some(anchor) = &side.anchor else { return };
    match &anchor.best_candidate {
        Some(c) => out.push_str(&format!(
            "Recent {} matches of {} (archive name \"{}\", score {:.2})\n",
            side.side, side.display_name, c, anchor.score
        )),
        None => {
            out.push_str(&format!("No archive match for {}\n", side.display_name));
            return;
        }
    }
    for p in &side.recent_matches {
        out.push_str(&format!(
            "  {:>2}. {}  {} {} {}  goals {}  corners {}\n",
            p.display_rank(),
            p.date,
            p.home_name,
            if p.score.is_empty() { "vs" } else { p.score.as_str() },
            p.away_name,
            fmt_opt(p.metrics.gf, 0),
            fmt_opt(*p.metrics.get(Metric::Corners), 0),
        ));
    }
}

/// Human-readable report.
pub fn render_report_text(report: &FixtureReport) -> String {
    let mut out = String::new();
    let meta = &report.meta;

    out.push_str(&format!(
        "{} x {}\n",
        report.home.display_name, report.away.display_name
    ));
    let mut line = Vec::new();
    if let Some(id) = &meta.fixture_id {
        line.push(format!("ID {id}"));
    }
    if let Some(c) = &meta.competition {
        line.push(c.clone());
    }
    if let Some(md) = &meta.matchday {
        line.push(format!("MD {md}"));
    }
    if let Some(d) = meta.date {
        line.push(d.to_br_string());
    }
    if !line.is_empty() {
        out.push_str(&line.join(" | "));
        out.push('\n');
    }
    for side in Side::BOTH {
        let s = report.side(side);
        if s.position.is_some() || s.points.is_some() {
            out.push_str(&format!(
                "{}: position {} points {}\n",
                s.display_name,
                s.position.map_or("-".to_string(), |p| p.to_string()),
                s.points.map_or("-".to_string(), |p| p.to_string()),
            ));
        }
    }
    out.push('\n');

    if !report.statistics.has_data() {
        out.push_str("No enriched similar games found for this fixture.\n\n");
    }
    render_side_stats(&mut out, &report.home.display_name, &report.statistics.home_stats);
    render_side_stats(&mut out, &report.away.display_name, &report.statistics.away_stats);

    let g = &report.goal_summary;
    out.push_str(&format!(
        "\nExpected goals {} - {} (total {}) from {} similar games, {}\n",
        fmt_opt(g.expected_home_goals, 2),
        fmt_opt(g.expected_away_goals, 2),
        fmt_opt(g.expected_total_goals, 2),
        g.samples,
        fmt_confidence(&g.confidence)
    ));

    if let Some(tag) = &report.archive_schema {
        out.push_str(&format!("\nArchive columns: {tag}\n"));
        render_recent(&mut out, &report.home);
        render_recent(&mut out, &report.away);
    }
    out
}

/// Parameters of the `report` command.
#[derive(Debug, Clone)]
pub struct FixtureReportParams {
    pub similar: PathBuf,
    pub panel: Option<PathBuf>,
    pub archive: ArchiveSource,
    pub home: Option<String>,
    pub away: Option<String>,
    pub date: Option<MatchDate>,
    pub anchors: AnchorArgs,
    pub fixture_id: Option<FixtureId>,
    pub limit: Option<usize>,
    pub as_json: bool,
    pub out: Option<PathBuf>,
}

/// Turn CLI anchor flags into overrides.
pub fn anchor_overrides(args: &AnchorArgs) -> (Option<AnchorOverride>, Option<AnchorOverride>) {
    let make = |name: &Option<String>, score: Option<f64>| {
        name.as_ref().map(|canonical| AnchorOverride {
            canonical: canonical.clone(),
            score,
        })
    };
    (
        make(&args.home_anchor, args.home_anchor_score),
        make(&args.away_anchor, args.away_anchor_score),
    )
}

/// Handle the report command
pub async fn handle_fixture_report(ctx: &CommandContext, params: FixtureReportParams) -> Result<()> {
    let mut similar_rows = load_csv(&params.similar)?;
    let mut panel_rows = load_optional_csv(params.panel.as_deref())?;
    if let Some(id) = params.fixture_id {
        similar_rows = rows_for_fixture(similar_rows, id);
        panel_rows = rows_for_fixture(panel_rows, id);
    }
    // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
    let archive_rows = ctx.load_archive(&params.archive).await?;

    let (home_anchor, away_anchor) = anchor_overrides(&params.anchors);
    let inputs = ReportInputs {
        similar_rows,
        panel_rows,
        archive_rows,
        base_key: Some(base_key(&params.similar)),
        home_seed: params.home,
        away_seed: params.away,
        fixture_date: params.date,
        home_anchor,
        away_anchor,
        limit: params.limit,
    };

    let report = build_fixture_report(&inputs, &ctx.settings);

    if let Some(out) = &params.out {
        write_string(out, &serde_json::to_string_pretty(&report)?)?;
        debug!(path = %out.display(), "report written");
    }

    if params.as_json {
        print_json(&report)?;
    } else {
        print!("{}", render_report_text(&report));
    }
    Ok(())
}
