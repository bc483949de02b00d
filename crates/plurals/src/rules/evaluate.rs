//! Constraint evaluation against decimal operands.

use super::{Conjunction, Disjunction, Relation, Target};
use crate::operands::{DecimalOperands, PluralOperand};

impl Relation {
    /// Whether `operands` satisfy this relation, negation included.
    pub fn is_satisfied(&self, operands: &DecimalOperands) -> bool {
        self.holds(operands) != self.negated
    }

    fn holds(&self, operands: &DecimalOperands) -> bool {
        if self.integer_only && operands.visible_fraction_digit_count() != 0 {
            return false;
        }
        // Non-integral values are members of no range.
        let Some(value) = self.reduced_operand(operands) else {
            return false;
        };
        match &self.target {
            Target::Value(expected) => value == *expected,
            Target::Ranges(ranges) => ranges.iter().any(|range| range.contains(value)),
        }
    }

    /// The operand after `mod`, or `None` when it is not a whole number.
    fn reduced_operand(&self, operands: &DecimalOperands) -> Option<u64> {
        let value = match self.operand {
            PluralOperand::N => {
                let n = operands.value();
                let reduced = match self.modulus {
                    Some(modulus) => n % modulus as f64,
                    None => n,
                };
                return (reduced.fract() == 0.0).then_some(reduced as u64);
            }
            PluralOperand::E | PluralOperand::C => {
                let exponent = i64::from(operands.exponent());
                let reduced = match self.modulus {
                    Some(modulus) => exponent.rem_euclid(i64::try_from(modulus).ok()?),
                    None => exponent,
                };
                return u64::try_from(reduced).ok();
            }
            PluralOperand::I => operands.integer_value(),
            PluralOperand::F => operands.fraction_digits(),
            PluralOperand::T => operands.fraction_digits_trimmed(),
            PluralOperand::V => u64::from(operands.visible_fraction_digit_count()),
            PluralOperand::W => u64::from(operands.trimmed_fraction_digit_count()),
        };
        Some(self.modulus.map_or(value, |modulus| value % modulus))
    }
}

impl Conjunction {
    /// True when every relation holds; an empty conjunction always holds.
    pub fn is_satisfied(&self, operands: &DecimalOperands) -> bool {
        self.relations
            .iter()
            .all(|relation| relation.is_satisfied(operands))
    }
}

impl Disjunction {
    /// True when any conjunction holds; an empty disjunction never holds.
    pub fn is_satisfied(&self, operands: &DecimalOperands) -> bool {
        self.conjunctions
            .iter()
            .any(|conjunction| conjunction.is_satisfied(operands))
    }
}
