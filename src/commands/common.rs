//! Common utilities and helper functions shared across commands.

use std::path::Path;

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::{
    cli::ArchiveSource,
    core::{
        config::{load_settings, Settings},
        http::fetch_archive_rows,
        row::Row,
        source::load_csv,
    },
    stats::aggregate::Confidence,
    Result,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub settings: Settings,
    client: Client,
}

impl CommandContext {
    /// Load settings from `config` (or the default location)
    pub fn new(config: Option<&Path>) -> Result<Self> {
        let settings = load_settings(config)?;
        debug!(?settings, "settings loaded");
        Ok(Self::with_settings(settings))
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// Read the league archive from a file or URL; empty when neither is set.
    pub async fn load_archive(&self, source: &ArchiveSource) -> Result<Vec<Row>> {
        if let Some(path) = &source.archive {
            return load_csv(path);
        }
        if let Some(url) = &source.archive_url {
            return fetch_archive_rows(&self.client, url).await;
        }
        Ok(Vec::new())
    }

    /// Recent-match limit: the CLI override, else the configured value.
    pub fn recent_limit(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.settings.recent_limit)
    }
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fixed-precision number, or `-` when absent.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}

/// `71% (high confidence)`, or `- (no data)`.
pub fn fmt_confidence(c: &Confidence) -> String {
    match c.percent {
        Some(p) => format!("{}% ({})", p, c.label),
        None => format!("- ({})", c.label),
    }
}
