//! Sample annotations (`@integer` and `@decimal` lists).
//!
//! Each rule may list example numbers it should select. The parser
//! validates the lists; [`RuleSet::verify_samples`](super::RuleSet::verify_samples)
//! checks them against the conditions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Keyword;
use crate::operands::DecimalOperands;

/// Which sample list a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    Integer,
    Decimal,
}

impl SampleKind {
    /// The marker introducing the list in rule text.
    pub fn marker(self) -> &'static str {
        match self {
            SampleKind::Integer => "@integer",
            SampleKind::Decimal => "@decimal",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleKind::Integer => f.write_str("integer"),
            SampleKind::Decimal => f.write_str("decimal"),
        }
    }
}

/// One sample entry: a single number or an inclusive `low~high` range.
///
/// Both ends share their visible fraction digit count and exponent, so the
/// range steps by one unit in the last visible digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    low: DecimalOperands,
    high: DecimalOperands,
    low_scaled: u64,
    high_scaled: u64,
}

impl SampleRange {
    /// Validate a range, returning the reason it is rejected.
    pub(crate) fn new(low: DecimalOperands, high: DecimalOperands) -> Result<Self, &'static str> {
        if low.visible_fraction_digit_count() != high.visible_fraction_digit_count() {
            return Err("range ends have different fraction digit counts");
        }
        if low.exponent() != high.exponent() {
            return Err("range ends have different exponents");
        }
        let (Some(low_scaled), Some(high_scaled)) = (scaled(&low), scaled(&high)) else {
            return Err("too many digits");
        };
        if low_scaled > high_scaled {
            return Err("range is empty");
        }
        Ok(SampleRange {
            low,
            high,
            low_scaled,
            high_scaled,
        })
    }

    pub fn low(&self) -> &DecimalOperands {
        &self.low
    }

    pub fn high(&self) -> &DecimalOperands {
        &self.high
    }

    pub fn is_single(&self) -> bool {
        self.low_scaled == self.high_scaled
    }

    /// Number of values the range expands to.
    pub fn value_count(&self) -> u64 {
        (self.high_scaled - self.low_scaled).saturating_add(1)
    }
}

/// All digits of a number as one integer: `1.25` is 125.
fn scaled(operands: &DecimalOperands) -> Option<u64> {
    10u64
        .checked_pow(operands.visible_fraction_digit_count())?
        .checked_mul(operands.integer_value())?
        .checked_add(operands.fraction_digits())
}

/// A parsed sample list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Samples {
    raw: String,
    ranges: Vec<SampleRange>,
    unbounded: bool,
}

impl Samples {
    pub(crate) fn new(raw: String, ranges: Vec<SampleRange>, unbounded: bool) -> Self {
        Samples {
            raw,
            ranges,
            unbounded,
        }
    }

    /// The list as written, normalized to `a, b~c, …` spacing.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn ranges(&self) -> &[SampleRange] {
        &self.ranges
    }

    /// Whether the list ends in `…`, meaning more values exist.
    pub fn is_unbounded(&self) -> bool {
        self.unbounded
    }

    /// Expand the list into concrete numbers, at most `limit` of them.
    pub fn values(&self, limit: usize) -> Vec<DecimalOperands> {
        let mut values = Vec::new();
        for range in &self.ranges {
            let visible = range.low.visible_fraction_digit_count();
            let exponent = range.low.exponent();
            for scaled in range.low_scaled..=range.high_scaled {
                if values.len() >= limit {
                    return values;
                }
                if let Some(value) = DecimalOperands::from_scaled(scaled, visible, exponent) {
                    values.push(value);
                }
            }
        }
        values
    }
}

impl fmt::Display for Samples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A sample whose selected keyword differs from the one it is listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleMismatch {
    pub keyword: Keyword,
    pub kind: SampleKind,
    pub sample: DecimalOperands,
    pub selected: Keyword,
}

impl fmt::Display for SampleMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is listed under '{}' {} but selects '{}'",
            self.sample,
            self.keyword,
            self.kind.marker(),
            self.selected
        )
    }
}
