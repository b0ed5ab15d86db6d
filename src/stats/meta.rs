//! Fixture metadata gathered from whichever sources carry it.

use serde::{Deserialize, Serialize};

use super::panel::{find_panel_row, TEAM_NAME_COLUMN};
use crate::cli::types::{MatchDate, Side};
use crate::core::row::Row;
use crate::matching::display::teams_from_base_key;

pub const FIXTURE_ID_COLUMNS: &[&str] = &["fixture_id"];
pub const COMPETITION_COLUMNS: &[&str] = &["competition"];
pub const FIXTURE_DATE_COLUMNS: &[&str] = &["utcDate_fixture", "utcDate"];
pub const MATCHDAY_COLUMNS: &[&str] = &["matchday_fixture", "matchday"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureMeta {
    pub fixture_id: Option<String>,
    pub competition: Option<String>,
    pub date: Option<MatchDate>,
    /// Kick-off cell as written in the source.
    pub date_raw: Option<String>,
    pub matchday: Option<String>,
    pub home_name: Option<String>,
    pub away_name: Option<String>,
}

impl FixtureMeta {
    /// Fields come from the first row of the similar-games source, then the
    /// first panel row. Team names come from the panel `side` rows, then from
    /// the `__HOME_vs_AWAY` pattern of `base_key`.
    pub fn from_sources(similar_rows: &[Row], panel_rows: &[Row], base_key: Option<&str>) -> Self {
        let heads: Vec<&Row> = [similar_rows.first(), panel_rows.first()]
            .into_iter()
            .flatten()
            .collect();
        let field = |cols: &[&str]| {
            heads
                .iter()
                .find_map(|r| r.first_text(cols))
                .map(str::to_string)
        };

        let date_raw = field(FIXTURE_DATE_COLUMNS);
        let date = date_raw.as_deref().and_then(MatchDate::from_cell);

        let panel_name = |side| {
            find_panel_row(panel_rows, side)
                .and_then(|r| r.text(TEAM_NAME_COLUMN))
                .map(str::to_string)
        };
        let mut home_name = panel_name(Side::Home);
        let mut away_name = panel_name(Side::Away);

        if home_name.is_none() || away_name.is_none() {
            if let Some((home, away)) = base_key.and_then(teams_from_base_key) {
                home_name = home_name.or(Some(home));
                away_name = away_name.or(Some(away));
            }
        }

        Self {
            fixture_id: field(FIXTURE_ID_COLUMNS),
            competition: field(COMPETITION_COLUMNS),
            date,
            date_raw,
            matchday: field(MATCHDAY_COLUMNS),
            home_name,
            away_name,
        }
    }

    pub fn team_name(&self, side: Side) -> Option<&str> {
        match side {
            Side::Home => self.home_name.as_deref(),
            Side::Away => self.away_name.as_deref(),
        }
    }
}
