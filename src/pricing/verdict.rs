//! Comparison of the asking price against the suggested interval.

use std::fmt;

use super::range::PriceInterval;

/// Where the asking price falls relative to the suggested interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    BelowRange,
    InRange,
    AboveRange,
    Unavailable,
}

impl Verdict {
    /// User-facing message for this verdict.
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::BelowRange => {
                "Your asking price is below the suggested range - a great deal for buyers."
            }
            Verdict::InRange => "Your asking price is within the suggested range.",
            Verdict::AboveRange => {
                "Your asking price is above the suggested range - consider lowering it for a faster sale."
            }
            Verdict::Unavailable => {
                "Could not compare your asking price: the suggested range has no numeric bounds."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::BelowRange => "below_range",
            Verdict::InRange => "in_range",
            Verdict::AboveRange => "above_range",
            Verdict::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an asking price against an interval.
///
/// Bounds are taken at face value; an inverted interval (`min > max`) is not
/// corrected.
pub fn classify(asking: f64, interval: &PriceInterval) -> Verdict {
    let Some((min, max)) = interval.bounds() else {
        return Verdict::Unavailable;
    };

    if asking < min as f64 {
        Verdict::BelowRange
    } else if asking > max as f64 {
        Verdict::AboveRange
    } else {
        Verdict::InRange
    }
}
