//! Rank and distance weights.

/// Added to distances so an exact match (distance 0) keeps a finite weight.
pub const DELTA_EPSILON: f64 = 1e-6;

/// `1/rank` for a positive rank, `0` otherwise. Top1 = 1.0, Top2 = 0.5, ...
pub fn weight_from_rank(rank: Option<i64>) -> f64 {
    match rank {
        Some(r) if r > 0 => 1.0 / r as f64,
        _ => 0.0,
    }
}

/// Inverse-distance weight for the listing summary; absent or negative
/// distances weigh nothing.
pub fn weight_from_delta(delta: Option<f64>) -> f64 {
    match delta {
        Some(d) if d.is_finite() && d >= 0.0 => 1.0 / (d + DELTA_EPSILON),
        _ => 0.0,
    }
}
