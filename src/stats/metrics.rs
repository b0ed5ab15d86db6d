//! The seven "for" metrics and where each source keeps them.
//!
//! Column aliases are explicit ordered lists per logical field. A source is
//! resolved once against its headers ([`ResolvedColumn::resolve`]); per row,
//! the first non-empty resolved column wins.

use serde::{Deserialize, Serialize};

use crate::cli::types::Side;
use crate::core::numeric::try_float;
use crate::core::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Goals,
    Corners,
    Yellows,
    Reds,
    Fouls,
    Shots,
    ShotsOnTarget,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Goals,
        Metric::Corners,
        Metric::Yellows,
        Metric::Reds,
        Metric::Fouls,
        Metric::Shots,
        Metric::ShotsOnTarget,
    ];

    /// Key used in panel column names (`baseline_{key}_mean`).
    pub fn stat_key(&self) -> &'static str {
        match self {
            Metric::Goals => "gf",
            Metric::Corners => "corners",
            Metric::Yellows => "yellows",
            Metric::Reds => "reds",
            Metric::Fouls => "fouls",
            Metric::Shots => "shots",
            Metric::ShotsOnTarget => "shots_on",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Goals => "Goals",
            Metric::Corners => "Corners",
            Metric::Yellows => "Yellow cards",
            Metric::Reds => "Red cards",
            Metric::Fouls => "Fouls",
            Metric::Shots => "Shots",
            Metric::ShotsOnTarget => "Shots on target",
        }
    }

    /// Columns of the enriched similar-games export, for the team playing
    /// on `side`.
    pub fn similar_columns(&self, side: Side) -> &'static [&'static str] {
        match (self, side) {
            (Metric::Goals, Side::Home) => &["fd_FTHG", "fd_HG", "FTHG"],
            (Metric::Goals, Side::Away) => &["fd_FTAG", "fd_AG", "FTAG"],
            (Metric::Corners, Side::Home) => &["fd_HC", "HC"],
            (Metric::Corners, Side::Away) => &["fd_AC", "AC"],
            (Metric::Yellows, Side::Home) => &["fd_HY", "HY"],
            (Metric::Yellows, Side::Away) => &["fd_AY", "AY"],
            (Metric::Reds, Side::Home) => &["fd_HR", "HR"],
            (Metric::Reds, Side::Away) => &["fd_AR", "AR"],
            (Metric::Fouls, Side::Home) => &["fd_HF", "HF"],
            (Metric::Fouls, Side::Away) => &["fd_AF", "AF"],
            (Metric::Shots, Side::Home) => &["fd_HS", "HS"],
            (Metric::Shots, Side::Away) => &["fd_AS", "AS"],
            (Metric::ShotsOnTarget, Side::Home) => &["fd_HST", "HST"],
            (Metric::ShotsOnTarget, Side::Away) => &["fd_AST", "AST"],
        }
    }

    /// Native columns of a league archive, for the team playing on `side`.
    pub fn archive_columns(&self, side: Side) -> &'static [&'static str] {
        match (self, side) {
            (Metric::Goals, Side::Home) => &["FTHG", "HG"],
            (Metric::Goals, Side::Away) => &["FTAG", "AG"],
            (m, s) => &m.similar_columns(s)[1..],
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One value per metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerMetric<T> {
    pub gf: T,
    pub corners: T,
    pub yellows: T,
    pub reds: T,
    pub fouls: T,
    pub shots: T,
    pub shots_on: T,
}

impl<T> PerMetric<T> {
    pub fn from_fn(mut f: impl FnMut(Metric) -> T) -> Self {
        Self {
            gf: f(Metric::Goals),
            corners: f(Metric::Corners),
            yellows: f(Metric::Yellows),
            reds: f(Metric::Reds),
            fouls: f(Metric::Fouls),
            shots: f(Metric::Shots),
            shots_on: f(Metric::ShotsOnTarget),
        }
    }

    pub fn get(&self, metric: Metric) -> &T {
        match metric {
            Metric::Goals => &self.gf,
            Metric::Corners => &self.corners,
            Metric::Yellows => &self.yellows,
            Metric::Reds => &self.reds,
            Metric::Fouls => &self.fouls,
            Metric::Shots => &self.shots,
            Metric::ShotsOnTarget => &self.shots_on,
        }
    }

    /// `(metric, value)` pairs in [`Metric::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &T)> {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

pub type MetricValues = PerMetric<Option<f64>>;

/// Present aliases of one logical field, in alias order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumn {
    columns: Vec<String>,
}

impl ResolvedColumn {
    pub fn resolve(headers: &[String], aliases: &[&str]) -> Self {
        Self {
            columns: aliases
                .iter()
                .filter(|a| headers.iter().any(|h| h == *a))
                .map(|a| a.to_string())
                .collect(),
        }
    }

    pub fn is_present(&self) -> bool {
        !self.columns.is_empty()
    }

    /// First non-empty trimmed cell among the resolved columns.
    pub fn text<'a>(&self, row: &'a Row) -> Option<&'a str> {
        self.columns.iter().find_map(|c| row.text(c))
    }

    pub fn float(&self, row: &Row) -> Option<f64> {
        self.text(row).and_then(try_float)
    }
}

/// Metric columns of one source, resolved for both sides.
#[derive(Debug, Clone, Default)]
pub struct MetricColumns {
    home: PerMetric<ResolvedColumn>,
    away: PerMetric<ResolvedColumn>,
}

impl MetricColumns {
    pub fn for_similar(headers: &[String]) -> Self {
        Self {
            home: PerMetric::from_fn(|m| ResolvedColumn::resolve(headers, m.similar_columns(Side::Home))),
            away: PerMetric::from_fn(|m| ResolvedColumn::resolve(headers, m.similar_columns(Side::Away))),
        }
    }

    pub fn for_archive(headers: &[String]) -> Self {
        Self {
            home: PerMetric::from_fn(|m| ResolvedColumn::resolve(headers, m.archive_columns(Side::Home))),
            away: PerMetric::from_fn(|m| ResolvedColumn::resolve(headers, m.archive_columns(Side::Away))),
        }
    }

    /// Read all seven metrics of `row` from `side`'s perspective.
    pub fn read(&self, row: &Row, side: Side) -> MetricValues {
        let cols = match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        };
        PerMetric::from_fn(|m| cols.get(m).float(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_stat_keys_are_unique() {
        let keys: Vec<&str> = Metric::ALL.iter().map(|m| m.stat_key()).collect();
        for (i, k) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(k));
        }
        assert_eq!(Metric::ShotsOnTarget.stat_key(), "shots_on");
    }

    #[test]
    fn test_archive_columns_drop_enriched_prefix() {
        assert_eq!(Metric::Corners.archive_columns(Side::Away), &["AC"]);
        assert_eq!(Metric::Goals.archive_columns(Side::Home), &["FTHG", "HG"]);
        assert!(Metric::ALL
            .iter()
            .all(|m| Side::BOTH.iter().all(|s| !m.archive_columns(*s)[0].starts_with("fd_"))));
    }

    #[test]
    fn test_resolved_column_alias_order_and_fallback() {
        let h = headers(&["fd_reason", "reason", "rank"]);
        let col = ResolvedColumn::resolve(&h, &["fd_reason", "reason"]);
        assert!(col.is_present());

        let row = Row::from_pairs([("fd_reason", ""), ("reason", "no match"), ("rank", "1")]);
        assert_eq!(col.text(&row), Some("no match"));

        let missing = ResolvedColumn::resolve(&h, &["nope"]);
        assert!(!missing.is_present());
        assert_eq!(missing.text(&row), None);
    }

    #[test]
    fn test_metric_columns_read_by_side() {
        let h = headers(&["fd_FTHG", "fd_FTAG", "fd_HC", "fd_AC"]);
        let cols = MetricColumns::for_similar(&h);
        let row = Row::from_pairs([("fd_FTHG", "2"), ("fd_FTAG", "1"), ("fd_HC", "7,5"), ("fd_AC", "x")]);

        let home = cols.read(&row, Side::Home);
        assert_eq!(home.gf, Some(2.0));
        assert_eq!(home.corners, Some(7.5));
        assert_eq!(home.shots, None);

        let away = cols.read(&row, Side::Away);
        assert_eq!(away.gf, Some(1.0));
        assert_eq!(away.corners, None);
    }

    #[test]
    fn test_per_metric_iter_order() {
        let values = PerMetric::from_fn(|m| m.stat_key().len());
        let order: Vec<Metric> = values.iter().map(|(m, _)| m).collect();
        assert_eq!(order, Metric::ALL.to_vec());
        assert_eq!(*values.get(Metric::Reds), 4);
    }
}
