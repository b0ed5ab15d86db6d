//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{FixtureId, MatchDate, Side};

/// Where to read the league archive from.
#[derive(Debug, Clone, Args)]
pub struct ArchiveSource {
    /// League archive CSV (e.g. a football-data.co.uk season file).
    #[clap(long, conflicts_with = "archive_url")]
    pub archive: Option<PathBuf>,

    /// Download the league archive from this URL instead of a local file.
    #[clap(long)]
    pub archive_url: Option<String>,
}

impl ArchiveSource {
    pub fn is_set(&self) -> bool {
        self.archive.is_some() || self.archive_url.is_some()
    }
}

/// Upstream canonical names that bypass fuzzy anchor matching.
#[derive(Debug, Clone, Default, Args)]
pub struct AnchorArgs {
    /// Canonical archive name for the home team.
    #[clap(long)]
    pub home_anchor: Option<String>,

    /// Similarity score to report for `--home-anchor` (default 1.0).
    #[clap(long, requires = "home_anchor")]
    pub home_anchor_score: Option<f64>,

    /// Canonical archive name for the away team.
    #[clap(long)]
    pub away_anchor: Option<String>,

    /// Similarity score to report for `--away-anchor` (default 1.0).
    #[clap(long, requires = "away_anchor")]
    pub away_anchor_score: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the full pre-match report for one fixture.
    ///
    /// Reads the similar-games export, plus the optional panel export and
    /// league archive, and prints weighted indicators with confidence.
    Report {
        /// Similar-games CSV (rank, fd_found, fd_FTHG, ...).
        #[clap(long)]
        similar: PathBuf,

        /// Panel CSV with baseline/similar aggregates per side.
        #[clap(long)]
        panel: Option<PathBuf>,

        #[clap(flatten)]
        archive: ArchiveSource,

        /// Home team name (defaults to the panel or file name).
        #[clap(long)]
        home: Option<String>,

        /// Away team name (defaults to the panel or file name).
        #[clap(long)]
        away: Option<String>,

        /// Fixture date; recent matches are taken strictly before it.
        #[clap(long)]
        date: Option<MatchDate>,

        #[clap(flatten)]
        anchors: AnchorArgs,

        /// Keep only rows of this fixture when the exports hold several.
        #[clap(long)]
        fixture_id: Option<FixtureId>,

        /// Recent matches per side (overrides the configured limit).
        #[clap(long)]
        limit: Option<usize>,

        /// Output the report as JSON instead of text.
        #[clap(long)]
        json: bool,

        /// Also write the JSON report to this file.
        #[clap(long)]
        out: Option<PathBuf>,
    },

    /// List a team's most recent archive matches before a date.
    Recent {
        #[clap(flatten)]
        archive: ArchiveSource,

        /// Team name, matched fuzzily against the archive.
        #[clap(long)]
        team: String,

        /// Whether to look at the team's home or away matches.
        #[clap(long, default_value = "home")]
        side: Side,

        /// Only matches strictly before this date.
        #[clap(long)]
        before: MatchDate,

        /// Maximum matches to list (overrides the configured limit).
        #[clap(long)]
        limit: Option<usize>,

        // --home-anchor applies with --side home, --away-anchor with --side away
        #[clap(flatten)]
        anchors: AnchorArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Score a team name against candidate spellings.
    Match {
        /// Name to resolve.
        #[clap(long)]
        name: String,

        /// Candidate name (repeatable): `--candidate "Real Madrid" --candidate Barcelona`.
        #[clap(long = "candidate", required = true)]
        candidates: Vec<String>,

        /// Output the match as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Print the canonical form of each name.
    Canon {
        #[clap(required = true)]
        names: Vec<String>,
    },

    /// Build reports for every fixture listed in a JSON manifest, in parallel.
    Batch {
        /// Manifest file: a JSON array of fixture entries.
        #[clap(long)]
        manifest: PathBuf,

        /// Output the reports as a JSON array.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "fixture-stats",
    version,
    about = "Weighted pre-match statistics from historical football data"
)]
pub struct FixtureStatsCli {
    /// Settings file (or set `FIXTURE_STATS_CONFIG`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
