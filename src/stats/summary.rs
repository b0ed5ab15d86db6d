//! Fixture-list goal summary.
//!
//! Uses the distance weight (`delta_total_val`) rather than the rank, and
//! reads goals from the previous match's full-time score, so it works on
//! similar-games exports that were never enriched with match statistics.

use serde::{Deserialize, Serialize};

use super::aggregate::{
    mean_of_two, mean_simple, mean_weighted, variance_weighted, Confidence, ConfidencePolicy, Tier,
};
use super::picks::SCORE_COLUMNS;
use super::weighting::weight_from_delta;
use crate::core::numeric::{parse_score, try_float};
use crate::core::row::Row;

pub const DELTA_COLUMN: &str = "delta_total_val";

/// Below this the weighted mean counts as zero and the CV is undefined.
const ZERO_MEAN: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideGoals {
    pub goals_for: Option<f64>,
    pub goals_against: Option<f64>,
    pub goals_for_simple: Option<f64>,
    pub goals_against_simple: Option<f64>,
    /// Mean of the for/against CVs.
    pub cv_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    /// Rows with a readable score and a positive distance weight.
    pub samples: usize,
    pub home: SideGoals,
    pub away: SideGoals,
    /// Expected home goals: home scoring blended with away conceding.
    pub expected_home_goals: Option<f64>,
    pub expected_away_goals: Option<f64>,
    pub expected_total_goals: Option<f64>,
    pub game_cv_pct: Option<f64>,
    pub confidence: Confidence,
}

/// Weighted CV in percent, or `None` when the mean is zero.
///
/// Unlike the per-metric CV there is no saturation sentinel: a fixture list
/// of goalless games has no readable spread.
pub fn summary_cv_percent(values: &[Option<f64>], weights: &[f64]) -> Option<f64> {
    let mean = mean_weighted(values, weights)?;
    let var = variance_weighted(values, weights)?;
    if mean.abs() < ZERO_MEAN {
        return None;
    }
    Some(var.max(0.0).sqrt() / mean.abs() * 100.0)
}

/// Summary confidence is `100 - cv`, clamped to `0..=100`.
///
/// Tiers use the same CV cut-offs as the per-metric confidence, so
/// `cv <= green_max` (confidence at least 65 by default) is green.
pub fn confidence_from_summary_cv(cv: Option<f64>, policy: &ConfidencePolicy) -> Confidence {
    let Some(cv) = cv.filter(|c| c.is_finite()) else {
        return Confidence::no_data();
    };
    let percent = (100.0 - cv).clamp(0.0, 100.0);

    let tier = if percent >= 100.0 - policy.green_max {
        Tier::Green
    } else if percent >= 100.0 - policy.yellow_max {
        Tier::Yellow
    } else {
        Tier::Red
    };

    Confidence {
        percent: Some(percent.round() as u8),
        tier,
        label: tier.label().to_string(),
    }
}

fn side_goals(goals_for: &[Option<f64>], goals_against: &[Option<f64>], weights: &[f64]) -> SideGoals {
    SideGoals {
        goals_for: mean_weighted(goals_for, weights),
        goals_against: mean_weighted(goals_against, weights),
        goals_for_simple: mean_simple(goals_for),
        goals_against_simple: mean_simple(goals_against),
        cv_pct: mean_of_two(
            summary_cv_percent(goals_for, weights),
            summary_cv_percent(goals_against, weights),
        ),
    }
}

fn both(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some((a? + b?) / 2.0)
}

pub fn build_goal_summary(similar_rows: &[Row]) -> GoalSummary {
    build_goal_summary_with(similar_rows, &ConfidencePolicy::default())
}

pub fn build_goal_summary_with(similar_rows: &[Row], policy: &ConfidencePolicy) -> GoalSummary {
    let mut home_goals = Vec::new();
    let mut away_goals = Vec::new();
    let mut weights = Vec::new();

    for row in similar_rows {
        let Some((hg, ag)) = row.first_text(SCORE_COLUMNS).and_then(parse_score) else {
            continue;
        };
        let w = weight_from_delta(row.get(DELTA_COLUMN).and_then(try_float));
        if w <= 0.0 {
            continue;
        }
        home_goals.push(Some(hg as f64));
        away_goals.push(Some(ag as f64));
        weights.push(w);
    }

    // the away side's "for" is the home side's "against"
    let home = side_goals(&home_goals, &away_goals, &weights);
    let away = side_goals(&away_goals, &home_goals, &weights);

    let expected_home_goals = both(home.goals_for, away.goals_against);
    let expected_away_goals = both(away.goals_for, home.goals_against);
    let expected_total_goals = match (expected_home_goals, expected_away_goals) {
        (Some(h), Some(a)) => Some(h + a),
        _ => None,
    };

    let game_cv_pct = mean_of_two(home.cv_pct, away.cv_pct);

    GoalSummary {
        samples: weights.len(),
        home,
        away,
        expected_home_goals,
        expected_away_goals,
        expected_total_goals,
        game_cv_pct,
        confidence: confidence_from_summary_cv(game_cv_pct, policy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(score: &str, delta: &str) -> Row {
        Row::from_pairs([("score_fulltime_prev", score), ("delta_total_val", delta)])
    }

    #[test]
    fn test_goal_summary_equal_weights() {
        let rows = vec![row("2-1", "1"), row("0-1", "1")];
        let s = build_goal_summary(&rows);

        assert_eq!(s.samples, 2);
        assert!((s.home.goals_for.unwrap() - 1.0).abs() < 1e-9);
        assert!((s.home.goals_against.unwrap() - 1.0).abs() < 1e-9);
        assert!((s.away.goals_for.unwrap() - 1.0).abs() < 1e-9);
        assert!((s.expected_total_goals.unwrap() - 2.0).abs() < 1e-9);
        // home for: [2, 0] -> cv 100; home against: [1, 1] -> cv 0
        assert!((s.home.cv_pct.unwrap() - 50.0).abs() < 1e-6);
        assert!((s.game_cv_pct.unwrap() - 50.0).abs() < 1e-6);
        assert_eq!(s.confidence.percent, Some(50));
        assert_eq!(s.confidence.tier, Tier::Yellow);
    }

    #[test]
    fn test_goal_summary_goalless_list_has_no_confidence() {
        let rows = vec![row("0-0", "1"), row("0-0", "2")];
        let s = build_goal_summary(&rows);

        assert_eq!(s.samples, 2);
        assert_eq!(s.home.goals_for, Some(0.0));
        assert_eq!(s.home.cv_pct, None);
        assert_eq!(s.game_cv_pct, None);
        assert_eq!(s.confidence.percent, None);
        assert_eq!(s.confidence.tier, Tier::Gray);
    }

    #[test]
    fn test_summary_cv_zero_mean_is_none() {
        assert_eq!(summary_cv_percent(&[Some(-1.0), Some(1.0)], &[1.0, 1.0]), None);
        assert_eq!(summary_cv_percent(&[], &[]), None);
        let cv = summary_cv_percent(&[Some(2.0), Some(2.0)], &[1.0, 3.0]).unwrap();
        assert!(cv.abs() < 1e-12);
    }

    #[test]
    fn test_summary_confidence_is_hundred_minus_cv() {
        let p = ConfidencePolicy::default();
        let cases = [
            (0.0, 100, Tier::Green),
            (35.0, 65, Tier::Green),
            (35.5, 65, Tier::Yellow),
            (60.0, 40, Tier::Yellow),
            (61.0, 39, Tier::Red),
            (150.0, 0, Tier::Red),
        ];
        for (cv, percent, tier) in cases {
            let c = confidence_from_summary_cv(Some(cv), &p);
            assert_eq!(c.percent, Some(percent), "cv {cv}");
            assert_eq!(c.tier, tier, "cv {cv}");
        }
        assert_eq!(confidence_from_summary_cv(None, &p).tier, Tier::Gray);
    }

    #[test]
    fn test_goal_summary_closer_rows_weigh_more() {
        let rows = vec![row("3-0", "0.5"), row("0-0", "4")];
        let s = build_goal_summary(&rows);
        let gf = s.home.goals_for.unwrap();
        assert!(gf > 1.5 && gf < 3.0);
        assert_eq!(s.home.goals_for_simple, Some(1.5));
    }

    #[test]
    fn test_goal_summary_skips_unusable_rows() {
        let rows = vec![
            row("x-1", "1"),
            row("1-1", ""),
            Row::from_pairs([("score_fulltime", "2-2"), ("delta_total_val", "2")]),
        ];
        let s = build_goal_summary(&rows);
        assert_eq!(s.samples, 1);
        assert_eq!(s.home.goals_for, Some(2.0));
    }

    #[test]
    fn test_goal_summary_empty() {
        let s = build_goal_summary(&[]);
        assert_eq!(s.samples, 0);
        assert_eq!(s.expected_total_goals, None);
        assert_eq!(s.confidence.tier, Tier::Gray);
    }
}
