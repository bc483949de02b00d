//! Printing rule trees back as grammar text.
//!
//! The printed form parses back to an equal tree. Each relation is written
//! with one fixed spelling:
//! - a single [`Target::Value`] as `is` or `is not`
//! - ranges as `=` or `!=`, or `within` and `not within` when integer-only

use std::fmt;

use super::{Conjunction, Disjunction, Keyword, Range, Relation, Rule, RuleSet, SampleKind, Target};

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open() {
            write!(f, "{}..", self.low)
        } else if self.low == self.high {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}..{}", self.low, self.high)
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operand)?;
        if let Some(modulus) = self.modulus {
            write!(f, " % {modulus}")?;
        }

        match &self.target {
            Target::Value(value) => {
                let operator = if self.negated { "is not" } else { "is" };
                write!(f, " {operator} {value}")
            }
            Target::Ranges(ranges) => {
                let operator = match (self.integer_only, self.negated) {
                    (true, true) => "not within",
                    (true, false) => "within",
                    (false, true) => "!=",
                    (false, false) => "=",
                };
                write!(f, " {operator} ")?;
                for (index, range) in ranges.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{range}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, relation) in self.relations.iter().enumerate() {
            if index > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{relation}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Disjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, conjunction) in self.conjunctions.iter().enumerate() {
            if index > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{conjunction}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.keyword)?;
        if !self.keyword.is_other() {
            write!(f, " {}", self.condition)?;
        }
        for kind in [SampleKind::Integer, SampleKind::Decimal] {
            if let Some(samples) = self.samples(kind) {
                write!(f, " {} {samples}", kind.marker())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, rule) in self.rules().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
