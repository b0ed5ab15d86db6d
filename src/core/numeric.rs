//! Cell coercion helpers shared by every reader.
//!
//! All numeric cells go through [`try_float`]. Locale rules:
//! - surrounding whitespace is ignored
//! - the first `,` is read as the decimal separator (`"1,5"` is `1.5`)
//! - thousands separators are not supported (`"1,234.5"` is rejected)
//! - empty, garbage, `NaN` and infinite values all become `None`

use chrono::NaiveDate;

/// Parse a float from a raw cell, tolerating a decimal comma.
pub fn try_float(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replacen(',', ".", 1);
    let v: f64 = s.parse().ok()?;
    v.is_finite().then_some(v)
}

/// Parse an integer by truncating [`try_float`] (`"2.7"` is `2`).
pub fn try_int(raw: &str) -> Option<i64> {
    let f = try_float(raw)?;
    let t = f.trunc();
    if t < i64::MIN as f64 || t > i64::MAX as f64 {
        return None;
    }
    Some(t as i64)
}

/// Parse a full-time score such as `"2-1"` or `" 0 - 0 "` into `(home, away)`.
///
/// Any run of ASCII digits is a valid side; runs too long for `u64` saturate.
pub fn parse_score(raw: &str) -> Option<(u64, u64)> {
    let (home, away) = raw.trim().split_once('-')?;
    let (home, away) = (home.trim(), away.trim());
    if home.is_empty() || away.is_empty() {
        return None;
    }
    if !home.bytes().all(|b| b.is_ascii_digit()) || !away.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let goals = |digits: &str| digits.parse().unwrap_or(u64::MAX);
    Some((goals(home), goals(away)))
}

/// Boolean flag cells: only `true` (any case) counts as set.
pub fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// Parse a match date in any of the forms the sources use:
/// `YYYY-MM-DD`, an ISO datetime (`2024-03-01T15:00:00Z`, `2024-03-01 15:00`),
/// `DD/MM/YYYY` or `DD/MM/YY`.
pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let bytes = s.as_bytes();
    if bytes.len() >= 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        let head = s.get(..10)?;
        return NaiveDate::parse_from_str(head, "%Y-%m-%d").ok();
    }

    if s.contains('/') {
        let date_part = s.split_whitespace().next()?;
        let year = date_part.rsplit('/').next()?;
        let fmt = match year.len() {
            2 => "%d/%m/%y",
            4 => "%d/%m/%Y",
            _ => return None,
        };
        return NaiveDate::parse_from_str(date_part, fmt).ok();
    }

    None
}
