//! Shortest round-trip decimal digits of a double.
//!
//! Plural operands are defined over the digits a default formatter would
//! show. For a double that is the shortest decimal string which parses back
//! to the same binary value: `0.1` is `1e-1`, not `1.000000000000000055e-1`.

/// A finite, non-negative double written as `significand × 10^exponent`
/// with the fewest significant digits that still round-trip.
///
/// The significand carries no trailing zeros; zero is `0 × 10^0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortestDecimal {
    significand: u64,
    exponent: i32,
}

impl ShortestDecimal {
    /// Extract the shortest digits of `value`'s magnitude.
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        // `{:e}` without a precision prints the shortest round-trip digits.
        let text = format!("{:e}", value.abs());
        let (mantissa, exponent) = text.split_once('e')?;
        let exponent: i32 = exponent.parse().ok()?;
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let mut significand: u64 = 0;
        for c in whole.chars().chain(fraction.chars()) {
            let digit = c.to_digit(10)?;
            significand = significand.checked_mul(10)?.checked_add(u64::from(digit))?;
        }

        let mut exponent = exponent.checked_sub(i32::try_from(fraction.len()).ok()?)?;
        if significand == 0 {
            exponent = 0;
        }
        while significand != 0 && significand % 10 == 0 {
            significand = significand.div_euclid(10);
            exponent += 1;
        }

        Some(ShortestDecimal {
            significand,
            exponent,
        })
    }

    /// The significant digits as an integer.
    pub fn significand(&self) -> u64 {
        self.significand
    }

    /// Power of ten applied to the significand.
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Number of significant digits.
    pub fn digit_count(&self) -> u32 {
        self.significand.checked_ilog10().map_or(1, |log| log + 1)
    }

    /// Digits after the decimal point in positional notation.
    pub fn fraction_digit_count(&self) -> u32 {
        if self.exponent < 0 {
            self.exponent.unsigned_abs()
        } else {
            0
        }
    }

    /// Parse the digits back into a double.
    pub fn to_f64(&self) -> f64 {
        format!("{}e{}", self.significand, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }
}
