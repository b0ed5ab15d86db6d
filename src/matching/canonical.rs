//! Team-name canonical forms.
//!
//! Two names denote the same team when their canonical forms are equal:
//! `"São Paulo FC"`, `"SAO PAULO"` and `"Sao-Paulo"` all become `sao paulo`.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;


/// Club-type words and connectives that carry no identity.
pub const STOPWORDS: &[&str] = &[
    "fc", "cf", "sc", "ac", "afc", "cfc", "club", "clube", "de", "da", "do", "dos", "das", "the",
    "futebol", "football",
];

/// A canonicalized team name.
///
/// # Examples
///
/// ```rust
/// use fixture_stats::matching::canonicalize;
///
/// assert_eq!(canonicalize("São Paulo FC"), canonicalize("sao paulo"));
/// assert_eq!(canonicalize("Brighton & Hove Albion").as_str(), "brighton and hove albion");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalName(String);

impl CanonicalName {
    /// Wrap an already-canonical name without re-normalizing it.
    pub fn verbatim(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn strip_marks(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

pub fn canonicalize(name: &str) -> CanonicalName {
    let s = name.trim().replace('\u{00d7}', "x");

    // lower-casing can itself produce combining marks (İ -> i̇)
    let s = strip_marks(&strip_marks(&s).to_lowercase());
    let s = s.replace('_', " ").replace('&', " and ");

    // every run of anything that is not a letter or digit separates tokens
    let tokens: Vec<&str> = s
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !is_stopword(t))
        .collect();

    CanonicalName(tokens.join(" "))
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}
