//! Loading CSV exports into [`Row`]s.
//!
//! Tolerates the quirks of the upstream exports: a UTF-8 BOM, ragged records
//! (short rows are padded with empty cells) and padded headers.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::row::Row;
use crate::cli::types::FixtureId;
use crate::Result;

pub const FIXTURE_ID_COLUMN: &str = "fixture_id";

/// Parse CSV text into rows keyed by the trimmed header line.
pub fn parse_csv_str(text: &str) -> Result<Vec<Row>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let row = Row::from_pairs(
            headers
                .iter()
                .enumerate()
                .map(|(j, h)| (h.clone(), record.get(j).unwrap_or("").to_string())),
        );
        rows.push(row);
    }
    Ok(rows)
}

/// Read and parse a CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<Row>> {
    let text = std::fs::read_to_string(path)?;
    let rows = parse_csv_str(&text)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded csv");
    Ok(rows)
}

/// Read an optional CSV file; `None` input means the source is absent.
pub fn load_optional_csv(path: Option<&Path>) -> Result<Vec<Row>> {
    match path {
        Some(p) => load_csv(p),
        None => Ok(Vec::new()),
    }
}

/// Fixture "base key" of an export file: the file stem without its
/// `__top12` / `__panels` suffix (`PL__ID1__Arsenal_vs_Chelsea__top12.csv`
/// gives `PL__ID1__Arsenal_vs_Chelsea`).
pub fn base_key(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if let Some(base) = stem.strip_suffix("__panels") {
        return base.to_string();
    }
    match stem.rfind("__top") {
        Some(idx) => stem[..idx].to_string(),
        None => stem.to_string(),
    }
}

/// Rows belonging to `fixture_id`. Sources without a `fixture_id` column
/// are assumed to hold a single fixture and are returned whole.
pub fn rows_for_fixture(rows: Vec<Row>, fixture_id: FixtureId) -> Vec<Row> {
    if !rows.iter().any(|r| r.get(FIXTURE_ID_COLUMN).is_some()) {
        return rows;
    }
    rows.into_iter()
        .filter(|r| r.get(FIXTURE_ID_COLUMN).is_some_and(|v| fixture_id.matches_cell(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_csv_str_basic() {
        let rows = parse_csv_str("rank,home_prev\n1,Santos\n2,\"Grêmio, RS\"\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("rank"), Some("1"));
        assert_eq!(rows[1].get("home_prev"), Some("Grêmio, RS"));
    }

    #[test]
    fn test_parse_csv_str_bom_and_ragged_rows() {
        let rows = parse_csv_str("\u{feff}Date , HomeTeam,AwayTeam\n01/03/2024,Arsenal\n\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Date"), Some("01/03/2024"));
        assert_eq!(rows[0].get("HomeTeam"), Some("Arsenal"));
        assert_eq!(rows[0].get("AwayTeam"), Some(""));
    }

    #[test]
    fn test_parse_csv_str_header_only() {
        assert!(parse_csv_str("a,b,c\n").unwrap().is_empty());
        assert!(parse_csv_str("").unwrap().is_empty());
    }

    #[test]
    fn test_load_csv_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("PL__ID9__Arsenal_vs_Chelsea__panels.csv");
        fs::write(&path, "side,team_name\nHOME,Arsenal\nAWAY,Chelsea\n").unwrap();

        let rows = load_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(base_key(&path), "PL__ID9__Arsenal_vs_Chelsea");
    }

    #[test]
    fn test_base_key_suffixes() {
        assert_eq!(base_key(Path::new("a/PL__ID9__A_vs_B__top12.csv")), "PL__ID9__A_vs_B");
        assert_eq!(base_key(Path::new("PL__ID9__A_vs_B__top.csv")), "PL__ID9__A_vs_B");
        assert_eq!(base_key(Path::new("plain.csv")), "plain");
    }

    #[test]
    fn test_rows_for_fixture() {
        let rows = parse_csv_str("fixture_id,rank\n7,1\n8,1\n7,2\n").unwrap();
        let kept = rows_for_fixture(rows, FixtureId::new(7));
        assert_eq!(kept.len(), 2);

        let untagged = parse_csv_str("rank\n1\n2\n").unwrap();
        assert_eq!(rows_for_fixture(untagged, FixtureId::new(7)).len(), 2);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_csv(&temp_dir.path().join("nope.csv"));
        assert!(matches!(result, Err(crate::FixtureError::Io(_))));
    }

    #[test]
    fn test_load_optional_csv_absent() {
        assert!(load_optional_csv(None).unwrap().is_empty());
    }
}
