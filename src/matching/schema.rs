//! Locating the date/home/away columns of an unknown league archive.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::row::{headers_of, Row};

const EXACT: [&str; 3] = ["Date", "HomeTeam", "AwayTeam"];
const ALTERNATE: [&str; 3] = ["Date", "Home", "Away"];

const DATE_WORDS: &[&str] = &["date", "matchdate", "data"];
const HOME_WORDS: &[&str] = &["hometeam", "home", "mandante"];
const AWAY_WORDS: &[&str] = &["awayteam", "away", "visitante"];

/// How the columns were found, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaConfidence {
    Exact,
    Alternate,
    Heuristic,
    Positional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSchema {
    pub date: String,
    pub home: String,
    pub away: String,
    pub confidence: SchemaConfidence,
}

impl ArchiveSchema {
    fn new(cols: [&str; 3], confidence: SchemaConfidence) -> Self {
        Self {
            date: cols[0].to_string(),
            home: cols[1].to_string(),
            away: cols[2].to_string(),
            confidence,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence == SchemaConfidence::Positional
    }

    /// Short description for reports.
    pub fn tag(&self) -> String {
        match self.confidence {
            SchemaConfidence::Exact => "exact".to_string(),
            SchemaConfidence::Alternate => "alternate".to_string(),
            SchemaConfidence::Heuristic => format!(
                "heuristic ({} / {} / {})",
                self.date, self.home, self.away
            ),
            SchemaConfidence::Positional => format!(
                "positional fallback, low confidence ({} / {} / {})",
                self.date, self.home, self.away
            ),
        }
    }
}

fn has_all(headers: &[String], cols: &[&str; 3]) -> bool {
    cols.iter().all(|c| headers.iter().any(|h| h == c))
}

fn find_word<'a>(headers: &'a [String], words: &[&str], taken: &[&str]) -> Option<&'a str> {
    words.iter().find_map(|w| {
        headers
            .iter()
            .map(String::as_str)
            .find(|h| h.trim().eq_ignore_ascii_case(w) && !taken.contains(h))
    })
}

/// Resolve from a header list. `None` when there are fewer than three columns.
pub fn resolve_schema_from_headers(headers: &[String]) -> Option<ArchiveSchema> {
    if has_all(headers, &EXACT) {
        return Some(ArchiveSchema::new(EXACT, SchemaConfidence::Exact));
    }
    if has_all(headers, &ALTERNATE) {
        return Some(ArchiveSchema::new(ALTERNATE, SchemaConfidence::Alternate));
    }

    let date = find_word(headers, DATE_WORDS, &[]);
    let home = date.and_then(|d| find_word(headers, HOME_WORDS, &[d]));
    let away = date.zip(home).and_then(|(d, h)| find_word(headers, AWAY_WORDS, &[d, h]));
    if let (Some(d), Some(h), Some(a)) = (date, home, away) {
        return Some(ArchiveSchema::new([d, h, a], SchemaConfidence::Heuristic));
    }

    if headers.len() < 3 {
        return None;
    }
    let schema = ArchiveSchema::new(
        [headers[0].as_str(), headers[1].as_str(), headers[2].as_str()],
        SchemaConfidence::Positional,
    );
    warn!(schema = %schema.tag(), "archive columns not recognised, guessing by position");
    Some(schema)
}

pub fn resolve_schema(rows: &[Row]) -> Option<ArchiveSchema> {
    resolve_schema_from_headers(&headers_of(rows))
}
