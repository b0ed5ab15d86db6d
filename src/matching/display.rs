//! Turning raw seeds (panel labels, file names) into clean team names.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::canonical::canonicalize;
use crate::core::numeric::try_int;
use crate::core::row::Row;

/// Similar-games columns that may hold a team name.
pub const TEAM_NAME_COLUMNS: &[&str] = &[
    "home_prev",
    "away_prev",
    "target_team",
    "opponent",
    "home",
    "away",
    "home_fixture",
    "away_fixture",
];

static MATCHDAY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^MD\s*\d+\s*[-–—•|]?\s*\d{4}-\d{2}-\d{2}\s*[-–—•|]?\s*")
        .expect("matchday prefix regex")
});
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}\s*[-–—•|]?\s*").expect("date prefix regex"));
static MATCHDAY_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^MD\s*\d+").expect("matchday regex"));
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("iso date regex"));
static ID_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ID\d+").expect("id token regex"));

/// Drop a leading `MD22 2026-02-01` label (with optional separators) and any
/// leading ISO date.
pub fn strip_fixture_prefix(label: &str) -> String {
    let s = MATCHDAY_PREFIX.replace(label.trim(), "");
    let s = DATE_PREFIX.replace(s.trim(), "");
    s.trim().to_string()
}

/// Whether a seed looks like a file or fixture label rather than a team.
pub fn looks_dirty_team_name(name: &str) -> bool {
    let t = name.trim();
    t.is_empty()
        || MATCHDAY_START.is_match(t)
        || ISO_DATE.is_match(t)
        || t.to_ascii_lowercase().contains("histseason")
        || ID_TOKEN.is_match(t)
        || t.contains("__")
        || t.contains("_vs_")
}

/// Team names from a base key such as `PL__ID537812__Aston_Villa_vs_Newcastle__top12`.
pub fn teams_from_base_key(base_key: &str) -> Option<(String, String)> {
    base_key
        .split("__")
        .filter(|seg| !seg.starts_with('_'))
        .find_map(|seg| seg.split_once("_vs_"))
        .and_then(|(home, away)| {
            let home = home.replace('_', " ").trim().to_string();
            let away = away.replace('_', " ").trim().to_string();
            (!home.is_empty() && !away.is_empty()).then_some((home, away))
        })
}

/// Clean seed for one side: the source name with its prefix stripped, or
/// the base-key name when that still looks like a label.
pub fn clean_seed(raw: Option<&str>, fallback: Option<&str>) -> String {
    let raw = raw.unwrap_or_default();
    let cleaned = strip_fixture_prefix(raw);
    if !looks_dirty_team_name(&cleaned) {
        return cleaned;
    }
    match fallback {
        Some(f) if !f.trim().is_empty() => f.trim().to_string(),
        _ if !cleaned.is_empty() => cleaned,
        _ => raw.trim().to_string(),
    }
}

/// The longest spelling in the similar rows whose canonical form equals the
/// seed's; the seed itself when there is none.
pub fn pick_display_name(seed: &str, rows: &[Row]) -> String {
    let target = canonicalize(seed);
    if target.is_empty() {
        return seed.to_string();
    }

    let mut best: Option<&str> = None;
    for row in rows {
        for col in TEAM_NAME_COLUMNS {
            let Some(v) = row.text(col) else { continue };
            if canonicalize(v) != target {
                continue;
            }
            if best.map_or(true, |b| v.chars().count() > b.chars().count()) {
                best = Some(v);
            }
        }
    }
    best.unwrap_or(seed).to_string()
}

/// Most frequent league position of `team` across the similar rows (as
/// target or opponent); ties go to the better (lower) position.
pub fn estimate_team_position(rows: &[Row], team: &str) -> Option<i64> {
    let target = canonicalize(team);
    if target.is_empty() {
        return None;
    }

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for row in rows {
        let sides = [("target_team", "target_pos_then"), ("opponent", "opponent_pos_then")];
        for (name_col, pos_col) in sides {
            let same = row.text(name_col).is_some_and(|n| canonicalize(n) == target);
            if let Some(p) = row.get(pos_col).and_then(try_int).filter(|_| same) {
                *counts.entry(p).or_insert(0) += 1;
            }
        }
    }

    // BTreeMap iterates ascending, so the first maximum is the lowest position
    let mut best: Option<(i64, usize)> = None;
    for (pos, n) in counts {
        if best.map_or(true, |(_, bn)| n > bn) {
            best = Some((pos, n));
        }
    }
    best.map(|(pos, _)| pos)
}
