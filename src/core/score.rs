//! Normalization of raw audit values into the integers written to CSV.

/// Reported when the WAVE error counter is not present on the page.
pub const MISSING_COUNT: i64 = -1;

/// Convert a 0..=1 fractional score into a rounded percentage.
/// Halves round up, so 0.926 becomes 93.
pub fn normalize_fraction(score: f64) -> Option<i64> {
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return None;
    }
    Some((score * 100.0).round() as i64)
}

/// Leading-integer parse of counter text. Leading whitespace and a sign are
/// accepted and trailing text is ignored; text with no leading digits is
/// `None`. Values beyond `i64` saturate.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Map the WAVE `#error` counter text to a count. An absent counter is
/// `MISSING_COUNT`; a present but non-numeric counter counts as zero.
pub fn error_count(counter_text: Option<&str>) -> i64 {
    match counter_text {
        None => MISSING_COUNT,
        Some(text) => parse_leading_int(text).unwrap_or(0),
    }
}
