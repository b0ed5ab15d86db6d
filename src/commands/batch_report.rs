//! Batch reports from a JSON manifest

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    common::{print_json, CommandContext},
    fixture_report::{build_fixture_report, render_report_text, FixtureReport, ReportInputs},
};
use crate::{
    cli::{types::FixtureId, ArchiveSource},
    core::{
        cache::{ReportCache, ReportCacheKey},
        config::Settings,
        row::Row,
        source::{base_key, load_csv, load_optional_csv, rows_for_fixture},
    },
    matching::anchor::AnchorOverride,
    MatchDate, Result,
};

/// One fixture of a batch manifest. Relative paths are resolved against the
/// manifest's directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestEntry {
    pub similar: PathBuf,
    pub panel: Option<PathBuf>,
    pub archive: Option<PathBuf>,
    pub archive_url: Option<String>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub date: Option<String>,
    pub fixture_id: Option<FixtureId>,
    pub home_anchor: Option<String>,
    pub home_anchor_score: Option<f64>,
    pub away_anchor: Option<String>,
    pub away_anchor_score: Option<f64>,
    pub limit: Option<usize>,
}

impl ManifestEntry {
    fn resolve_paths(&mut self, dir: &Path) {
        let resolve = |p: &PathBuf| {
            if p.is_relative() {
                dir.join(p)
            } else {
                p.clone()
            }
        };
        self.similar = resolve(&self.similar);
        self.panel = self.panel.as_ref().map(resolve);
        self.archive = self.archive.as_ref().map(resolve);
    }

    fn archive_source(&self) -> ArchiveSource {
        ArchiveSource {
            archive: self.archive.clone(),
            archive_url: self.archive_url.clone(),
        }
    }

    /// Cache label: the fixture id when given, else the similar file's base key.
    pub fn label(&self) -> String {
        match self.fixture_id {
            Some(id) => id.to_string(),
            None => base_key(&self.similar),
        }
    }

    /// Report parameters as a row, so they take part in the cache key.
    fn params_row(&self, date: Option<MatchDate>) -> Row {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        Row::from_pairs([
            ("home", opt(&self.home)),
            ("away", opt(&self.away)),
            ("date", date.map(|d| d.to_string()).unwrap_or_default()),
            ("home_anchor", opt(&self.home_anchor)),
            ("home_anchor_score", num(self.home_anchor_score)),
            ("away_anchor", opt(&self.away_anchor)),
            ("away_anchor_score", num(self.away_anchor_score)),
            ("limit", self.limit.map(|l| l.to_string()).unwrap_or_default()),
        ])
    }
}

/// Read and parse a manifest: a JSON array of entries.
pub fn load_manifest(path: &Path) -> anyhow::Result<Vec<ManifestEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let mut entries: Vec<ManifestEntry> = serde_json::from_str(&text)
        .with_context(|| format!("parsing manifest {}", path.display()))?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    for entry in &mut entries {
        entry.resolve_paths(dir);
    }
    Ok(entries)
}

/// A manifest entry with its sources loaded.
#[derive(Debug, Clone)]
pub struct PreparedFixture {
    pub label: String,
    pub key: ReportCacheKey,
    pub inputs: ReportInputs,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub label: String,
    pub cached: bool,
    pub report: FixtureReport,
}

/// Build `ReportInputs` for an entry, with `archive_rows` already loaded.
pub fn prepare_fixture(entry: &ManifestEntry, archive_rows: Vec<Row>) -> Result<PreparedFixture> {
    let date = entry.date.as_deref().map(str::parse::<MatchDate>).transpose()?;

    let mut similar_rows = load_csv(&entry.similar)?;
    let mut panel_rows = load_optional_csv(entry.panel.as_deref())?;
    if let Some(id) = entry.fixture_id {
        similar_rows = rows_for_fixture(similar_rows, id);
        panel_rows = rows_for_fixture(panel_rows, id);
    }

    let label = entry.label();
    let params = [entry.params_row(date)];
    let key = ReportCacheKey::new(
        label.clone(),
        &[
            similar_rows.as_slice(),
            panel_rows.as_slice(),
            archive_rows.as_slice(),
            params.as_slice(),
        ],
    );

    let anchor = |name: &Option<String>, score: Option<f64>| {
        name.as_ref().map(|canonical| AnchorOverride {
            canonical: canonical.clone(),
            score,
        })
    };
    let inputs = ReportInputs {
        similar_rows,
        panel_rows,
        archive_rows,
        base_key: Some(base_key(&entry.similar)),
        home_seed: entry.home.clone(),
        away_seed: entry.away.clone(),
        fixture_date: date,
        home_anchor: anchor(&entry.home_anchor, entry.home_anchor_score),
        away_anchor: anchor(&entry.away_anchor, entry.away_anchor_score),
        limit: entry.limit,
    };

    Ok(PreparedFixture { label, key, inputs })
}

/// Compute every report in parallel. Fixtures whose key is already cached
/// are served from `cache`; output order follows `fixtures`.
pub fn build_batch_reports(
    fixtures: &[PreparedFixture],
    settings: &Settings,
    cache: &ReportCache<FixtureReport>,
) -> Vec<BatchOutcome> {
    fixtures
        .par_iter()
        .map(|f| {
            let (report, cached) = cache.get_or_insert_with(f.key.clone(), || {
                build_fixture_report(&f.inputs, settings)
            });
            debug!(fixture = %f.label, cached, "batch fixture done");
            BatchOutcome {
                label: f.label.clone(),
                cached,
                report,
            }
        })
        .collect()
}

/// Handle the batch command
pub async fn handle_batch_report(ctx: &CommandContext, manifest: &Path, as_json: bool) -> Result<()> {
    let entries = load_manifest(manifest)?;
    debug!(fixtures = entries.len(), "manifest loaded");

    // Archives are shared between fixtures of the same league
    let mut archives: HashMap<String, Vec<Row>> = HashMap::new();
    let mut fixtures = Vec::with_capacity(entries.len());
    for entry in &entries {
        let source = entry.archive_source();
        let archive_id = match (&source.archive, &source.archive_url) {
            (Some(p), _) => p.display().to_string(),
            (None, Some(u)) => u.clone(),
            (None, None) => String::new(),
        };
        if !archives.contains_key(&archive_id) {
            // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
            let rows = ctx.load_archive(&source).await?;
            archives.insert(archive_id.clone(), rows);
        }
        let archive_rows = archives.get(&archive_id).cloned().unwrap_or_default();
        fixtures.push(prepare_fixture(entry, archive_rows)?);
    }

    let cache = ReportCache::new(ctx.settings.cache_capacity);
    let outcomes = build_batch_reports(&fixtures, &ctx.settings, &cache);

    if as_json {
        print_json(&outcomes)?;
    } else {
        for (i, o) in outcomes.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(60));
            }
            print!("{}", render_report_text(&o.report));
        }
    }
    Ok(())
}
