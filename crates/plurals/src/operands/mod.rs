//! Decimal operand model.
//!
//! Plural rules test the digits of a number as it is displayed, not its
//! binary magnitude: `1` and `1.0` are different inputs. [`DecimalOperands`]
//! holds the CLDR operands of one displayed number:
//!
//! | operand | meaning                                                  |
//! |---------|----------------------------------------------------------|
//! | `n`     | absolute value                                           |
//! | `i`     | integer digits                                           |
//! | `v`     | number of visible fraction digits, with trailing zeros   |
//! | `w`     | number of visible fraction digits, without trailing zeros|
//! | `f`     | visible fraction digits as an integer, with trailing zeros|
//! | `t`     | visible fraction digits as an integer, without trailing zeros|
//! | `e`     | exponent of a scientific or compact display              |
//! | `c`     | alias of `e`                                             |

mod literal;
mod shortest;

use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub use shortest::ShortestDecimal;

/// Magnitudes at or above 2^63 have no operands.
pub(crate) const SAFE_MAGNITUDE_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Largest magnitude the fast path handles.
const FAST_PATH_LIMIT: f64 = 1_000_000_000.0;

/// Fraction digits the fast path tries before falling back.
const FAST_PATH_FRACTION_DIGITS: u32 = 3;

/// Fraction digits kept when rounding to a requested count. Any further
/// requested digits are zero padding.
const MAX_ROUNDED_FRACTION_DIGITS: u32 = 18;

/// Padding stops once `f` reaches 18 digits.
const MAX_PADDED_FRACTION: u64 = 100_000_000_000_000_000;

/// One of the CLDR plural operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralOperand {
    N,
    I,
    F,
    T,
    V,
    W,
    E,
    C,
}

impl PluralOperand {
    /// All operands in grammar order.
    pub const ALL: [PluralOperand; 8] = [
        PluralOperand::N,
        PluralOperand::I,
        PluralOperand::F,
        PluralOperand::T,
        PluralOperand::V,
        PluralOperand::W,
        PluralOperand::E,
        PluralOperand::C,
    ];

    /// Look up an operand by its grammar letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(PluralOperand::N),
            'i' => Some(PluralOperand::I),
            'f' => Some(PluralOperand::F),
            't' => Some(PluralOperand::T),
            'v' => Some(PluralOperand::V),
            'w' => Some(PluralOperand::W),
            'e' => Some(PluralOperand::E),
            'c' => Some(PluralOperand::C),
            _ => None,
        }
    }

    /// The grammar letter for this operand.
    pub fn as_char(self) -> char {
        match self {
            PluralOperand::N => 'n',
            PluralOperand::I => 'i',
            PluralOperand::F => 'f',
            PluralOperand::T => 't',
            PluralOperand::V => 'v',
            PluralOperand::W => 'w',
            PluralOperand::E => 'e',
            PluralOperand::C => 'c',
        }
    }
}

impl fmt::Display for PluralOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// How a number is going to be displayed.
///
/// # Example
///
/// ```
/// use plurals::{DecimalOperands, FormatHints};
///
/// let hints = FormatHints::builder().visible_fraction_digits(2).build();
/// let operands = DecimalOperands::with_hints(1.2, &hints);
/// assert_eq!(operands.to_string(), "1.20");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct FormatHints {
    /// Fraction digits to display, rounding the value. `None` shows the
    /// shortest digits that round-trip.
    pub visible_fraction_digits: Option<u32>,

    /// Exponent of a scientific or compact display.
    #[builder(default)]
    pub exponent: i32,

    /// Pad `f` and `v` with trailing zeros up to this many digits.
    pub min_fraction_digits: Option<u32>,
}

/// Displayed digits of a non-negative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Digits {
    pub integer: u64,
    pub fraction: u64,
    pub visible: u32,
}

impl Digits {
    fn whole(integer: u64) -> Self {
        Digits {
            integer,
            fraction: 0,
            visible: 0,
        }
    }

    /// Integers and values with at most three fraction digits.
    fn quick(source: f64) -> Option<Self> {
        if source.fract() == 0.0 {
            return Some(Digits::whole(source as u64));
        }
        if source >= FAST_PATH_LIMIT {
            return None;
        }
        for visible in 1..=FAST_PATH_FRACTION_DIGITS {
            let scale = 10u64.pow(visible);
            let scaled = (source * scale as f64).round();
            if scaled / scale as f64 == source {
                let scaled = scaled as u64;
                return Some(Digits {
                    integer: scaled.div_euclid(scale),
                    fraction: scaled.rem_euclid(scale),
                    visible,
                });
            }
        }
        None
    }

    /// Exact shortest round-trip digits.
    fn shortest(source: f64) -> Option<Self> {
        let decimal = ShortestDecimal::from_f64(source)?;
        let significand = decimal.significand();
        if decimal.exponent() >= 0 {
            let scale = 10u64.checked_pow(decimal.exponent().unsigned_abs())?;
            return significand.checked_mul(scale).map(Digits::whole);
        }
        let visible = decimal.fraction_digit_count();
        Some(match 10u64.checked_pow(visible) {
            Some(scale) => Digits {
                integer: significand.div_euclid(scale),
                fraction: significand.rem_euclid(scale),
                visible,
            },
            None => Digits {
                integer: 0,
                fraction: significand,
                visible,
            },
        })
    }

    /// Digits rounded to a fixed number of fraction digits, with the
    /// displayed value.
    ///
    /// At most 18 fraction digits are produced; the caller pads the rest.
    fn rounded(source: f64, visible: u32) -> Option<(Self, f64)> {
        let precision = usize::try_from(visible.min(MAX_ROUNDED_FRACTION_DIGITS)).ok()?;
        let text = format!("{source:.precision$}");
        let parsed = literal::parse_literal(&text).ok()?;
        Some((parsed.digits, parsed.value))
    }
}

/// The plural operands of one displayed number.
///
/// A small `Copy` value owned by whoever classifies the number.
///
/// # Example
///
/// ```
/// use plurals::DecimalOperands;
///
/// let one = DecimalOperands::from_value(1.0, None, 0);
/// assert_eq!(one.visible_fraction_digit_count(), 0);
///
/// let one_point_oh: DecimalOperands = "1.0".parse().unwrap();
/// assert_eq!(one_point_oh.visible_fraction_digit_count(), 1);
/// assert_eq!(one_point_oh.integer_value(), 1);
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DecimalOperands {
    #[serde(rename = "n")]
    source: f64,
    #[serde(rename = "i")]
    integer: u64,
    #[serde(rename = "f")]
    fraction: u64,
    #[serde(rename = "t")]
    trimmed: u64,
    #[serde(rename = "v")]
    visible: u32,
    #[serde(rename = "w")]
    trimmed_visible: u32,
    #[serde(rename = "e")]
    exponent: i32,
    negative: bool,
    nan: bool,
    infinite: bool,
}

impl DecimalOperands {
    /// Build the operands of `value` as it would be displayed.
    ///
    /// With `visible_fraction_digits` unset, the fraction digits are those
    /// of the shortest decimal string that parses back to `value`. With it
    /// set, `value` is rounded to that many fraction digits; digits past the
    /// eighteenth are zeros that count toward `v` but not `f`.
    /// `exponent` is recorded as `e` and `c`; `value` is the full magnitude.
    ///
    /// NaN, infinities and magnitudes of 2^63 or more produce a value with
    /// no operands (see [`has_operands`](Self::has_operands)).
    pub fn from_value(value: f64, visible_fraction_digits: Option<u32>, exponent: i32) -> Self {
        let negative = value < 0.0;
        let source = value.abs();
        if !source.is_finite() || source >= SAFE_MAGNITUDE_LIMIT {
            return DecimalOperands::without_operands(source, negative, exponent);
        }

        let resolved = match visible_fraction_digits {
            Some(visible) => Digits::rounded(source, visible),
            None => Digits::quick(source)
                .or_else(|| {
                    trace!(value = source, "shortest digit extraction");
                    Digits::shortest(source)
                })
                .map(|digits| (digits, source)),
        };

        let Some((digits, displayed)) = resolved else {
            return DecimalOperands::without_operands(source, negative, exponent);
        };
        let mut operands = DecimalOperands::from_digits(displayed, digits, negative, exponent);
        if let Some(visible) = visible_fraction_digits {
            operands.adjust_for_min_fraction_digits(visible);
        }
        operands
    }

    /// Build the operands of `value` displayed according to `hints`.
    pub fn with_hints(value: f64, hints: &FormatHints) -> Self {
        let mut operands =
            DecimalOperands::from_value(value, hints.visible_fraction_digits, hints.exponent);
        if let Some(min) = hints.min_fraction_digits {
            operands.adjust_for_min_fraction_digits(min);
        }
        operands
    }

    /// Build the operands of a number given as `scaled / 10^visible`.
    pub(crate) fn from_scaled(scaled: u64, visible: u32, exponent: i32) -> Option<Self> {
        let scale = 10u64.checked_pow(visible)?;
        let digits = Digits {
            integer: scaled.div_euclid(scale),
            fraction: scaled.rem_euclid(scale),
            visible,
        };
        let width = usize::try_from(visible).ok()?;
        let text = if visible == 0 {
            digits.integer.to_string()
        } else {
            format!("{}.{:0width$}", digits.integer, digits.fraction)
        };
        let source: f64 = text.parse().ok()?;
        Some(DecimalOperands::from_digits(source, digits, false, exponent))
    }

    pub(crate) fn from_digits(source: f64, digits: Digits, negative: bool, exponent: i32) -> Self {
        let mut trimmed = digits.fraction;
        let mut trailing_zeros = 0;
        while trimmed != 0 && trimmed % 10 == 0 {
            trimmed = trimmed.div_euclid(10);
            trailing_zeros += 1;
        }
        let trimmed_visible = if trimmed == 0 {
            0
        } else {
            digits.visible.saturating_sub(trailing_zeros)
        };

        DecimalOperands {
            source,
            integer: digits.integer,
            fraction: digits.fraction,
            trimmed,
            visible: digits.visible,
            trimmed_visible,
            exponent,
            negative,
            nan: false,
            infinite: false,
        }
    }

    fn without_operands(source: f64, negative: bool, exponent: i32) -> Self {
        DecimalOperands {
            source,
            integer: 0,
            fraction: 0,
            trimmed: 0,
            visible: 0,
            trimmed_visible: 0,
            exponent,
            negative,
            nan: source.is_nan(),
            infinite: source.is_infinite(),
        }
    }

    /// Pad `f` and `v` with trailing zeros up to `min` fraction digits.
    ///
    /// `t` and `w` are unchanged. Used when the number will be displayed
    /// with a fixed minimum precision.
    pub fn adjust_for_min_fraction_digits(&mut self, min: u32) {
        if !self.has_operands() {
            return;
        }
        let padding = min.saturating_sub(self.visible);
        for _ in 0..padding {
            if self.fraction >= MAX_PADDED_FRACTION {
                break;
            }
            self.fraction *= 10;
        }
        self.visible += padding;
    }

    /// The value of `operand` as rules compare it.
    pub fn operand(&self, operand: PluralOperand) -> f64 {
        match operand {
            PluralOperand::N => self.source,
            PluralOperand::I => self.integer as f64,
            PluralOperand::F => self.fraction as f64,
            PluralOperand::T => self.trimmed as f64,
            PluralOperand::V => f64::from(self.visible),
            PluralOperand::W => f64::from(self.trimmed_visible),
            PluralOperand::E | PluralOperand::C => f64::from(self.exponent),
        }
    }

    /// `n`: the absolute value.
    pub fn value(&self) -> f64 {
        self.source
    }

    /// The value with its sign restored.
    pub fn signed_value(&self) -> f64 {
        if self.negative { -self.source } else { self.source }
    }

    /// `i`: the integer digits.
    pub fn integer_value(&self) -> u64 {
        self.integer
    }

    /// `f`: visible fraction digits as an integer, with trailing zeros.
    pub fn fraction_digits(&self) -> u64 {
        self.fraction
    }

    /// `t`: visible fraction digits as an integer, without trailing zeros.
    pub fn fraction_digits_trimmed(&self) -> u64 {
        self.trimmed
    }

    /// `v`: number of visible fraction digits.
    pub fn visible_fraction_digit_count(&self) -> u32 {
        self.visible
    }

    /// `w`: number of visible fraction digits without trailing zeros.
    pub fn trimmed_fraction_digit_count(&self) -> u32 {
        self.trimmed_visible
    }

    /// `e`: exponent of a scientific display.
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// `c`: exponent of a compact display. Currently the same as `e`.
    pub fn compact_exponent(&self) -> i32 {
        self.exponent
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_nan(&self) -> bool {
        self.nan
    }

    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    pub fn is_nan_or_infinite(&self) -> bool {
        self.nan || self.infinite
    }

    /// Whether the value has no nonzero fraction digits.
    pub fn has_integer_value(&self) -> bool {
        self.has_operands() && self.source.fract() == 0.0
    }

    /// False for NaN, infinities and out-of-range magnitudes.
    ///
    /// Such values carry no digits; rule selection maps them to `other`.
    pub fn has_operands(&self) -> bool {
        self.source.is_finite() && self.source < SAFE_MAGNITUDE_LIMIT
    }
}

impl PartialEq for DecimalOperands {
    fn eq(&self, other: &Self) -> bool {
        self.source.to_bits() == other.source.to_bits()
            && self.integer == other.integer
            && self.fraction == other.fraction
            && self.trimmed == other.trimmed
            && self.visible == other.visible
            && self.trimmed_visible == other.trimmed_visible
            && self.exponent == other.exponent
            && self.negative == other.negative
            && self.nan == other.nan
            && self.infinite == other.infinite
    }
}

impl Eq for DecimalOperands {}

impl From<f64> for DecimalOperands {
    fn from(value: f64) -> Self {
        DecimalOperands::from_value(value, None, 0)
    }
}

impl From<i64> for DecimalOperands {
    fn from(value: i64) -> Self {
        let source = value.unsigned_abs() as f64;
        if source >= SAFE_MAGNITUDE_LIMIT {
            return DecimalOperands::without_operands(source, value < 0, 0);
        }
        DecimalOperands::from_digits(source, Digits::whole(value.unsigned_abs()), value < 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_quick_path_takes_short_fractions() {
        assert_eq!(
            Digits::quick(2.5),
            Some(Digits {
                integer: 2,
                fraction: 5,
                visible: 1
            })
        );
        assert_eq!(
            Digits::quick(0.125),
            Some(Digits {
                integer: 0,
                fraction: 125,
                visible: 3
            })
        );
    }

    #[test]
    fn test_quick_path_declines_long_fractions() {
        assert_eq!(Digits::quick(0.1 + 0.2), None);
        assert_eq!(Digits::quick(1.0001), None);
        assert_eq!(Digits::quick(1_000_000_000.5), None);
    }

    #[test]
    fn test_shortest_handles_what_quick_declines() {
        assert_eq!(
            Digits::shortest(1.0001),
            Some(Digits {
                integer: 1,
                fraction: 1,
                visible: 4
            })
        );
        assert_eq!(
            Digits::shortest(1_000_000_000.5),
            Some(Digits {
                integer: 1_000_000_000,
                fraction: 5,
                visible: 1
            })
        );
    }

    #[test]
    fn test_shortest_tiny_value_keeps_significant_digits() {
        let digits = Digits::shortest(1.5e-30).unwrap();
        assert_eq!(digits.integer, 0);
        assert_eq!(digits.fraction, 15);
        assert_eq!(digits.visible, 31);
    }

    #[test]
    fn test_rounded_carries_into_integer() {
        let (digits, displayed) = Digits::rounded(0.96, 1).unwrap();
        assert_eq!(
            digits,
            Digits {
                integer: 1,
                fraction: 0,
                visible: 1
            }
        );
        assert_eq!(displayed, 1.0);
    }

    #[test]
    fn test_rounded_stops_at_eighteen_digits() {
        let (digits, _) = Digits::rounded(0.5, 25).unwrap();
        assert_eq!(
            digits,
            Digits {
                integer: 0,
                fraction: 500_000_000_000_000_000,
                visible: 18
            }
        );
    }

    proptest! {
        #[test]
        fn quick_path_agrees_with_shortest(value in 0.0f64..2_000_000_000.0) {
            if let Some(quick) = Digits::quick(value) {
                prop_assert_eq!(Some(quick), Digits::shortest(value));
            }
        }

        #[test]
        fn quick_path_agrees_on_short_decimals(scaled in 0u64..10_000_000, visible in 0u32..=3) {
            let value = scaled as f64 / 10u64.pow(visible) as f64;
            if let Some(quick) = Digits::quick(value) {
                prop_assert_eq!(Some(quick), Digits::shortest(value));
            }
        }
    }
}
