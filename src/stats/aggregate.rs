//! Weighted statistics and the CV-based confidence model.
//!
//! Every aggregate skips `None` values; weighted aggregates additionally skip
//! pairs whose weight is not strictly positive. A zero total weight yields
//! `None` rather than a division by zero.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Tolerance for "zero" means and deviations.
pub const EPSILON: f64 = 1e-6;

/// CV reported when the mean is zero but the data still varies. Sits above
/// any sensible cap, so it always reads as maximum dispersion.
pub const CV_SATURATION: f64 = 999.0;

/// Thresholds for turning a CV% into a confidence percentage and tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    /// CV at (and above) which confidence reaches 0%.
    pub cv_cap: f64,
    pub green_max: f64,
    pub yellow_max: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            cv_cap: 120.0,
            green_max: 35.0,
            yellow_max: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Green,
    Yellow,
    Red,
    Gray,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Green => "high confidence",
            Tier::Yellow => "medium confidence",
            Tier::Red => "low confidence",
            Tier::Gray => "no data",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tier::Green => "green",
            Tier::Yellow => "yellow",
            Tier::Red => "red",
            Tier::Gray => "gray",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    pub percent: Option<u8>,
    pub tier: Tier,
    pub label: String,
}

impl Confidence {
    pub fn no_data() -> Self {
        Self {
            percent: None,
            tier: Tier::Gray,
            label: Tier::Gray.label().to_string(),
        }
    }
}

/// Mean of the present values.
pub fn mean_simple(values: &[Option<f64>]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Present `(value, weight)` pairs with a positive weight. Missing weights
/// count as zero.
fn weighted_pairs<'a>(
    values: &'a [Option<f64>],
    weights: &'a [f64],
) -> impl Iterator<Item = (f64, f64)> + 'a {
    values.iter().enumerate().filter_map(move |(i, v)| {
        let w = weights.get(i).copied().unwrap_or(0.0);
        match v {
            Some(v) if w > 0.0 => Some((*v, w)),
            _ => None,
        }
    })
}

pub fn mean_weighted(values: &[Option<f64>], weights: &[f64]) -> Option<f64> {
    let (sum, total) = weighted_pairs(values, weights)
        .fold((0.0, 0.0), |(s, sw), (v, w)| (s + v * w, sw + w));
    (total > 0.0).then(|| sum / total)
}

/// Population variance around the weighted mean.
pub fn variance_weighted(values: &[Option<f64>], weights: &[f64]) -> Option<f64> {
    let mean = mean_weighted(values, weights)?;
    let (acc, total) = weighted_pairs(values, weights).fold((0.0, 0.0), |(acc, sw), (v, w)| {
        let d = v - mean;
        (acc + w * d * d, sw + w)
    });
    (total > 0.0).then(|| acc / total)
}

/// Coefficient of variation in percent: `sd / |mean| * 100`.
///
/// A near-zero mean gives `0` when the data is also flat, and
/// [`CV_SATURATION`] otherwise.
pub fn cv_percent(values: &[Option<f64>], weights: &[f64]) -> Option<f64> {
    let var = variance_weighted(values, weights)?;
    let mean = mean_weighted(values, weights)?;
    let sd = var.max(0.0).sqrt();

    if mean.abs() < EPSILON {
        return Some(if sd < EPSILON { 0.0 } else { CV_SATURATION });
    }
    Some(sd / mean.abs() * 100.0)
}

/// Map a CV% onto a confidence percentage and tier.
///
/// The percentage uses the CV clamped to `[0, cv_cap]`; the tier uses the
/// raw CV.
pub fn confidence_from_cv(cv: Option<f64>, policy: &ConfidencePolicy) -> Confidence {
    let Some(cv) = cv.filter(|c| c.is_finite()) else {
        return Confidence::no_data();
    };

    let cap = policy.cv_cap;
    let clamped = cv.clamp(0.0, cap);
    let percent = (100.0 - clamped / cap * 100.0).round().clamp(0.0, 100.0) as u8;

    let tier = if cv <= policy.green_max {
        Tier::Green
    } else if cv <= policy.yellow_max {
        Tier::Yellow
    } else {
        Tier::Red
    };

    Confidence {
        percent: Some(percent),
        tier,
        label: tier.label().to_string(),
    }
}

/// Average of two optional values; either one alone when the other is absent.
pub fn mean_of_two(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Simple mean, weighted mean and confidence of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedMetric {
    pub simple_mean: Option<f64>,
    pub weighted_mean: Option<f64>,
    pub cv_pct: Option<f64>,
    pub confidence: Confidence,
}

impl WeightedMetric {
    pub fn empty() -> Self {
        Self {
            simple_mean: None,
            weighted_mean: None,
            cv_pct: None,
            confidence: Confidence::no_data(),
        }
    }

    pub fn from_values(values: &[Option<f64>], weights: &[f64], policy: &ConfidencePolicy) -> Self {
        let cv_pct = cv_percent(values, weights);
        Self {
            simple_mean: mean_simple(values),
            weighted_mean: mean_weighted(values, weights),
            cv_pct,
            confidence: confidence_from_cv(cv_pct, policy),
        }
    }
}
