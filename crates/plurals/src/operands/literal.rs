//! Decimal literal parsing and printing for operand views.
//!
//! Literals use the CLDR sample syntax: `[-]digits[.digits][(c|e)digits]`.
//! The exponent moves the decimal point, so `1.2c6` displays 1200000 with
//! no fraction digits.

use std::fmt;
use std::iter::repeat_n;
use std::str::FromStr;

use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::one_of;

use super::{DecimalOperands, Digits, SAFE_MAGNITUDE_LIMIT};
use crate::error::DecimalParseError;

/// Largest exponent accepted in a literal.
const MAX_LITERAL_EXPONENT: u32 = 18;

/// A literal split into its displayed parts.
///
/// `digits` holds the fraction digits exactly when they fit in a `u64`.
/// Otherwise it holds them without trailing zeros, and `visible` keeps the
/// full count so the zeros can be restored as padding.
pub(super) struct Literal {
    pub negative: bool,
    pub digits: Digits,
    pub visible: u32,
    pub exponent: u32,
    pub value: f64,
}

/// Raw pieces of a literal before the exponent is applied.
struct LiteralParts<'i> {
    negative: bool,
    integer: &'i str,
    fraction: &'i str,
    exponent: Option<&'i str>,
}

fn literal_parts<'i>(input: &mut &'i str) -> ModalResult<LiteralParts<'i>> {
    let negative = opt('-').parse_next(input)?.is_some();
    let integer = digit1.parse_next(input)?;
    let fraction = opt(preceded('.', digit1)).parse_next(input)?.unwrap_or("");
    let exponent = opt(preceded(one_of(['c', 'e']), digit1)).parse_next(input)?;
    Ok(LiteralParts {
        negative,
        integer,
        fraction,
        exponent,
    })
}

/// Parse a literal into displayed digits.
pub(super) fn parse_literal(text: &str) -> Result<Literal, DecimalParseError> {
    let invalid = || DecimalParseError::Invalid(text.to_string());
    let out_of_range = || DecimalParseError::OutOfRange(text.to_string());

    let mut remaining = text;
    let parts = literal_parts(&mut remaining).map_err(|_| invalid())?;
    if !remaining.is_empty() {
        return Err(invalid());
    }

    let exponent = match parts.exponent {
        Some(digits) => digits.parse::<u32>().map_err(|_| out_of_range())?,
        None => 0,
    };
    if exponent > MAX_LITERAL_EXPONENT {
        return Err(out_of_range());
    }

    // Shift the decimal point right by the exponent.
    let shift = usize::try_from(exponent).map_err(|_| out_of_range())?;
    let moved = parts.fraction.len().min(shift);
    let mut integer_digits = String::with_capacity(parts.integer.len() + shift);
    integer_digits.push_str(parts.integer);
    integer_digits.push_str(&parts.fraction[..moved]);
    integer_digits.extend(repeat_n('0', shift - moved));
    let fraction_digits = &parts.fraction[moved..];

    let integer: u64 = integer_digits.parse().map_err(|_| out_of_range())?;
    let value: f64 = if fraction_digits.is_empty() {
        integer_digits.parse()
    } else {
        format!("{integer_digits}.{fraction_digits}").parse()
    }
    .map_err(|_| invalid())?;
    if value >= SAFE_MAGNITUDE_LIMIT {
        return Err(out_of_range());
    }

    let visible = u32::try_from(fraction_digits.len()).map_err(|_| out_of_range())?;
    let significant = match parse_fraction(fraction_digits) {
        Some(fraction) => (fraction, visible),
        None => {
            let trimmed = fraction_digits.trim_end_matches('0');
            let count = u32::try_from(trimmed.len()).map_err(|_| out_of_range())?;
            (parse_fraction(trimmed).ok_or_else(out_of_range)?, count)
        }
    };

    Ok(Literal {
        negative: parts.negative,
        digits: Digits {
            integer,
            fraction: significant.0,
            visible: significant.1,
        },
        visible,
        exponent,
        value,
    })
}

/// Fraction digits as an integer, or `None` when they overflow.
fn parse_fraction(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

impl FromStr for DecimalOperands {
    type Err = DecimalParseError;

    /// Parse a displayed decimal such as `1.20` or `1.2c6`.
    ///
    /// Trailing fraction zeros are significant: `1.0` has one visible
    /// fraction digit while `1` has none.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = parse_literal(s)?;
        let exponent = i32::try_from(literal.exponent)
            .map_err(|_| DecimalParseError::OutOfRange(s.to_string()))?;
        let mut operands = DecimalOperands::from_digits(
            literal.value,
            literal.digits,
            literal.negative && literal.value > 0.0,
            exponent,
        );
        operands.adjust_for_min_fraction_digits(literal.visible);
        Ok(operands)
    }
}

impl fmt::Display for DecimalOperands {
    /// Print the displayed form; the inverse of [`FromStr`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return f.write_str("NaN");
        }
        if self.is_infinite() {
            let sign = if self.is_negative() { "-" } else { "" };
            return write!(f, "{sign}Infinity");
        }
        if !self.has_operands() {
            return write!(f, "{}", self.signed_value());
        }

        if self.is_negative() {
            f.write_str("-")?;
        }
        let integer = self.integer.to_string();
        // Printed from `t` and `w`, since `f` stops growing after 18 digits.
        let width = usize::try_from(self.trimmed_visible).unwrap_or(usize::MAX);
        let zeros = usize::try_from(self.visible.saturating_sub(self.trimmed_visible)).unwrap_or(0);
        let mut fraction = if self.trimmed_visible == 0 {
            String::new()
        } else {
            format!("{:0width$}", self.trimmed)
        };
        fraction.extend(repeat_n('0', zeros));

        let shift = usize::try_from(self.exponent).unwrap_or(0);
        if shift == 0 {
            f.write_str(&integer)?;
            if !fraction.is_empty() {
                write!(f, ".{fraction}")?;
            }
            return Ok(());
        }
        let integer = format!("{integer:0>len$}", len = shift + 1);

        // Compact form: move the last `shift` integer digits back behind the point.
        let (head, moved) = integer.split_at(integer.len() - shift);
        let mut tail = if self.visible == 0 {
            moved.trim_end_matches('0').to_string()
        } else {
            moved.to_string()
        };
        tail.push_str(&fraction);
        f.write_str(head)?;
        if !tail.is_empty() {
            write!(f, ".{tail}")?;
        }
        write!(f, "c{}", self.exponent)
    }
}
