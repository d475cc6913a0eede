//! NDC and date normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static VALID_NDC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[0-9]{5}-[0-9]{4}-[0-9]{2}|[0-9]{4}-[0-9]{4}-[0-9]{2}|[0-9]{5}-[0-9]{3}-[0-9]{2})$",
    )
    .expect("NDC format pattern compiles")
});

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})[-/]([0-9]{2})[-/]([0-9]{2})$").expect("ISO date pattern compiles")
});

static US_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})[-/]([0-9]{1,2})[-/]([0-9]{4})$").expect("US date pattern compiles")
});

/// Regroup the digits of an NDC by digit count: 11 -> 5-4-2, 10 -> 5-4-1,
/// 9 -> 4-4-1. Any other count returns the input unchanged.
pub fn normalize_ndc(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let (first, second) = match digits.len() {
        11 => (5, 9),
        10 => (5, 9),
        9 => (4, 8),
        _ => return raw.to_string(),
    };

    format!(
        "{}-{}-{}",
        &digits[..first],
        &digits[first..second],
        &digits[second..]
    )
}

/// `YYYY-MM-DD` / `YYYY/MM/DD` pass through with dashes, US month-first
/// `MM/DD/YYYY` is reordered. Anything else is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(caps) = ISO_DATE.captures(trimmed) {
        return format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = US_DATE.captures(trimmed) {
        return format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[1], &caps[2]);
    }

    raw.to_string()
}

/// Strict check against the three dashed layouts 5-4-2, 4-4-2 and 5-3-2.
///
/// Note that the 10- and 9-digit shapes produced by [`normalize_ndc`]
/// (5-4-1, 4-4-1) do not pass; callers use this to prompt for correction.
pub fn is_valid_ndc_format(ndc: &str) -> bool {
    VALID_NDC.is_match(ndc)
}
