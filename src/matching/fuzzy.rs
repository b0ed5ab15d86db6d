//! Best-effort fuzzy matching of team names.
//!
//! Scores live in `[0, 1]`: `1.0` for equal canonical forms, at least `0.9`
//! when one contains the other, otherwise the bigram Dice coefficient.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::canonical::{canonicalize, CanonicalName};

pub const SUBSTRING_BASE: f64 = 0.9;

/// Outcome of matching one name against a candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorMatch {
    pub canonical_seed: CanonicalName,
    /// `None` when the pool is empty or nothing scored above zero.
    pub best_candidate: Option<CanonicalName>,
    pub score: f64,
}

fn bigrams(s: &str) -> HashMap<(char, char), usize> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = HashMap::new();
    for w in chars.windows(2) {
        *out.entry((w[0], w[1])).or_insert(0) += 1;
    }
    out
}

/// Dice coefficient over character bigrams, counting repeated bigrams as a
/// multiset.
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    if a == b {
        return if a.is_empty() { 0.0 } else { 1.0 };
    }
    let ba = bigrams(a);
    let bb = bigrams(b);
    let total: usize = ba.values().sum::<usize>() + bb.values().sum::<usize>();
    if total == 0 {
        return 0.0;
    }
    let common: usize = ba
        .iter()
        .map(|(k, n)| bb.get(k).map_or(0, |m| (*n).min(*m)))
        .sum();
    2.0 * common as f64 / total as f64
}

/// Similarity of two canonical names.
pub fn similarity(a: &CanonicalName, b: &CanonicalName) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    let (sa, sb) = (a.as_str(), b.as_str());
    if sa.contains(sb) || sb.contains(sa) {
        let (la, lb) = (a.char_len() as f64, b.char_len() as f64);
        return SUBSTRING_BASE + 0.1 * la.min(lb) / la.max(lb);
    }
    dice_coefficient(sa, sb)
}

/// Match an already-canonical seed against canonical candidates. Ties keep
/// the first candidate seen.
pub fn best_canonical_match(seed: &CanonicalName, candidates: &[CanonicalName]) -> AnchorMatch {
    let mut best: Option<&CanonicalName> = None;
    let mut best_score = 0.0;
    for c in candidates {
        let score = similarity(seed, c);
        if score > best_score {
            best_score = score;
            best = Some(c);
        }
    }
    AnchorMatch {
        canonical_seed: seed.clone(),
        best_candidate: best.cloned(),
        score: best_score,
    }
}

/// Canonicalize `name` and every candidate, then pick the closest candidate.
pub fn best_match<S: AsRef<str>>(name: &str, candidates: &[S]) -> AnchorMatch {
    let pool: Vec<CanonicalName> = candidates.iter().map(|c| canonicalize(c.as_ref())).collect();
    best_canonical_match(&canonicalize(name), &pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(s: &str) -> CanonicalName {
        canonicalize(s)
    }

    #[test]
    fn test_best_match_real_madrid() {
        let m = best_match("Real Madrid CF", &["real madrid", "barcelona"]);
        assert_eq!(m.best_candidate.as_ref().map(|c| c.as_str()), Some("real madrid"));
        assert!(m.score >= 0.9);
        assert_eq!(m.canonical_seed.as_str(), "real madrid");
    }

    #[test]
    fn test_dice_bounds() {
        let d = dice_coefficient("abc", "abd");
        assert!(d > 0.0 && d < 1.0);
        assert!((d - 0.5).abs() < 1e-12);
        assert_eq!(dice_coefficient("abc", "abc"), 1.0);
        assert_eq!(dice_coefficient("abc", "xyz"), 0.0);
        assert_eq!(dice_coefficient("a", "b"), 0.0);
    }

    #[test]
    fn test_dice_counts_repeated_bigrams_once_per_occurrence() {
        // "aaaa": aa x3, "aa": aa x1 -> 2 * 1 / 4
        assert!((dice_coefficient("aaaa", "aa") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_substring_bonus() {
        let s = similarity(&canon("Manchester United"), &canon("Manchester"));
        let expected = 0.9 + 0.1 * 10.0 / 17.0;
        assert!((s - expected).abs() < 1e-12);
        assert_eq!(similarity(&canon("Santos"), &canon("SANTOS FC")), 1.0);
    }

    #[test]
    fn test_similarity_empty_is_zero() {
        assert_eq!(similarity(&canon(""), &canon("arsenal")), 0.0);
        assert_eq!(similarity(&canon("FC"), &canon("arsenal")), 0.0);
    }

    #[test]
    fn test_best_match_empty_pool() {
        let empty: [&str; 0] = [];
        let m = best_match("Arsenal", &empty);
        assert_eq!(m.best_candidate, None);
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn test_best_match_empty_target() {
        let m = best_match("  ", &["arsenal", "chelsea"]);
        assert_eq!(m.best_candidate, None);
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn test_best_match_ties_keep_first() {
        let m = best_match("abc", &["abd", "abe"]);
        assert_eq!(m.best_candidate, Some(canon("abd")));
    }

    #[test]
    fn test_best_match_fuzzy_spelling() {
        let m = best_match("Nottingham Forest", &["Nott'm Forest", "Norwich"]);
        assert_eq!(m.best_candidate, Some(canon("nott m forest")));
        assert!(m.score > 0.5 && m.score < 0.9);
    }
}
