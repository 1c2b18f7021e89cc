//! Numeric price interval parsing from human-formatted ranges.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Currency glyphs removed before parsing.
const CURRENCY_GLYPHS: [char; 5] = ['₹', '$', '€', '£', '¥'];

/// Range separators, in priority order.
const SEPARATORS: [&str; 5] = ["-", "\u{2013}", "to", "TO", "To"];

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("Invalid regex"));

/// Numeric `(min, max)` pair derived from a price-range string.
///
/// Either bound may be missing when parsing failed. `min > max` is kept as
/// received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceInterval {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl PriceInterval {
    pub const UNAVAILABLE: PriceInterval = PriceInterval {
        min: None,
        max: None,
    };

    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Both bounds, if both were derived.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        Some((self.min?, self.max?))
    }

    pub fn is_available(&self) -> bool {
        self.bounds().is_some()
    }
}

impl fmt::Display for PriceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds() {
            Some((min, max)) => write!(f, "{}-{}", min, max),
            None => f.write_str("unavailable"),
        }
    }
}

/// Parse a range like `"₹60000-₹70000"` or `"60,000 to 70,000"`.
///
/// The first separator that splits the cleaned text into at least two
/// non-empty parts is used; later separators are not tried. If either of its
/// first two parts has no digits, the digit runs of the whole string are used
/// instead (one run gives a single-point interval). A leading digit run too
/// large for `u64` makes the interval unavailable.
pub fn parse_range(text: &str) -> PriceInterval {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_GLYPHS.contains(c))
        .collect();
    let cleaned = cleaned.trim();

    if let Some(interval) = split_on_separator(cleaned) {
        return interval;
    }

    let numbers: Option<Vec<u64>> = DIGIT_RUN
        .find_iter(cleaned)
        .take(2)
        .map(|m| m.as_str().parse().ok())
        .collect();

    match numbers.as_deref() {
        Some([min, max]) => PriceInterval::new(*min, *max),
        Some([only]) => PriceInterval::new(*only, *only),
        _ => PriceInterval::UNAVAILABLE,
    }
}

fn split_on_separator(cleaned: &str) -> Option<PriceInterval> {
    let parts = SEPARATORS.iter().find_map(|sep| {
        let parts: Vec<&str> = cleaned
            .split(*sep)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        (parts.len() >= 2).then_some(parts)
    })?;

    let min = digits_only(parts[0])?;
    let max = digits_only(parts[1])?;
    Some(PriceInterval::new(min, max))
}

fn digits_only(part: &str) -> Option<u64> {
    let digits: String = part.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
