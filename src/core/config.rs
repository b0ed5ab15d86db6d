//! User settings: confidence policy, recent-match limit and anchor threshold.
//!
//! Lookup order: an explicit path (`--config`), then the path named by
//! [`CONFIG_ENV_VAR`](crate::CONFIG_ENV_VAR), then
//! `<config_dir>/fixture-stats/settings.json`. A missing default file yields
//! [`Settings::default`]; a file that exists but does not parse is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cache::try_read_to_string;
use crate::error::{FixtureError, Result};
use crate::stats::aggregate::ConfidencePolicy;
use crate::CONFIG_ENV_VAR;

pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const DEFAULT_MIN_ANCHOR_SCORE: f64 = 0.5;
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: ConfidencePolicy,
    /// Matches kept per side by the anchor resolver.
    pub recent_limit: usize,
    /// Fuzzy anchors scoring below this are still used, but logged.
    pub min_anchor_score: f64,
    /// Entries held by the batch report cache.
    pub cache_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: ConfidencePolicy::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            min_anchor_score: DEFAULT_MIN_ANCHOR_SCORE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON. Absent keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text).map_err(|e| FixtureError::Config {
            message: format!("malformed settings: {e}"),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.policy;
        if !(p.cv_cap.is_finite() && p.cv_cap > 0.0) {
            return Err(config_error(format!("cv_cap must be positive, got {}", p.cv_cap)));
        }
        if !(p.green_max >= 0.0 && p.green_max <= p.yellow_max) {
            return Err(config_error(format!(
                "expected 0 <= green_max <= yellow_max, got {} and {}",
                p.green_max, p.yellow_max
            )));
        }
        if self.recent_limit == 0 {
            return Err(config_error("recent_limit must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.min_anchor_score) {
            return Err(config_error(format!(
                "min_anchor_score must be within [0, 1], got {}",
                self.min_anchor_score
            )));
        }
        Ok(())
    }
}

fn config_error(message: String) -> FixtureError {
    FixtureError::Config { message }
}

/// Default settings location, honouring the environment override.
///
/// Path: ~/.config/fixture-stats/settings.json
pub fn settings_path() -> PathBuf {
    if let Some(p) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return PathBuf::from(p);
    }
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join("fixture-stats").join("settings.json")
}

/// Load settings from `explicit`, or from [`settings_path`] when `None`.
///
/// An explicit path must exist; the default location may be absent.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => settings_path(),
    };

    match try_read_to_string(&path) {
        Some(text) => {
            debug!(path = %path.display(), "loading settings");
            Settings::from_json(&text)
        }
        None if explicit.is_some() => Err(config_error(format!(
            "settings file not found: {}",
            path.display()
        ))),
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_settings_defaults() {
        let s = Settings::default();
        assert_eq!(s.recent_limit, 10);
        assert!((s.min_anchor_score - 0.5).abs() < 1e-12);
        assert!((s.policy.cv_cap - 120.0).abs() < 1e-12);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_settings_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"recent_limit": 5, "policy": {"green_max": 30}}"#).unwrap();
        assert_eq!(s.recent_limit, 5);
        assert!((s.policy.green_max - 30.0).abs() < 1e-12);
        assert!((s.policy.yellow_max - 60.0).abs() < 1e-12);
        assert!((s.policy.cv_cap - 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_settings_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, FixtureError::Config { .. }));
    }

    #[test]
    fn test_settings_validation_rejects_inverted_thresholds() {
        let err = Settings::from_json(r#"{"policy": {"green_max": 70, "yellow_max": 60}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("green_max"));

        assert!(Settings::from_json(r#"{"recent_limit": 0}"#).is_err());
        assert!(Settings::from_json(r#"{"min_anchor_score": 1.5}"#).is_err());
        assert!(Settings::from_json(r#"{"policy": {"cv_cap": 0}}"#).is_err());
    }

    #[test]
    fn test_load_settings_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"min_anchor_score": 0.7}"#).unwrap();

        let s = load_settings(Some(&path)).unwrap();
        assert!((s.min_anchor_score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_load_settings_explicit_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_settings(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_settings_path_shape() {
        let path = settings_path();
        if std::env::var_os(CONFIG_ENV_VAR).is_none() {
            assert!(path.ends_with("fixture-stats/settings.json"));
        }
    }
}
