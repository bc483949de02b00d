//! The immutable constraint tree built from rule grammar text.
//!
//! A rule's condition is kept in disjunctive normal form: a [`Disjunction`]
//! of [`Conjunction`]s of [`Relation`]s. A [`RuleSet`] owns one [`Rule`] per
//! keyword and always evaluates `other` last.

mod display;
mod evaluate;
mod keywords;
mod samples;

use std::cmp::Ordering;
use std::iter::{Chain, Once, once};
use std::ops::Deref;
use std::slice::Iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::PluralError;
use crate::operands::{DecimalOperands, PluralOperand};
use crate::parser::parse_rules;

pub use keywords::Keywords;
pub use samples::{SampleKind, SampleMismatch, SampleRange, Samples};

/// The keyword every rule set ends with.
pub const OTHER: &str = "other";

/// A plural category name such as `one` or `few`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The `other` keyword.
    pub fn other() -> Self {
        Self(OTHER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_other(&self) -> bool {
        self.0 == OTHER
    }
}

impl Deref for Keyword {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for Keyword {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Keyword {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for Keyword {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Keyword {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An inclusive range of integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub low: u64,
    pub high: u64,
}

impl Range {
    /// High bound of a range written as `low..` with no upper end.
    pub const OPEN_HIGH: u64 = u64::MAX;

    pub fn new(low: u64, high: u64) -> Self {
        Range { low, high }
    }

    /// A range holding one value.
    pub fn single(value: u64) -> Self {
        Range {
            low: value,
            high: value,
        }
    }

    /// A range with no upper end.
    pub fn open(low: u64) -> Self {
        Range {
            low,
            high: Range::OPEN_HIGH,
        }
    }

    pub fn is_open(&self) -> bool {
        self.high == Range::OPEN_HIGH
    }

    pub fn contains(&self, value: u64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// What a relation compares its operand against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A single value, from `is` and `is not`.
    Value(u64),
    /// A list of ranges, from `=`, `!=`, `in` and `within`.
    Ranges(Vec<Range>),
}

/// One comparison such as `n % 10 = 2..4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    pub operand: PluralOperand,
    /// Divisor from `mod` or `%`; never zero.
    pub modulus: Option<u64>,
    /// Set by `not`, `is not` and `!=`. Inverts the whole result.
    pub negated: bool,
    /// Set by `within`: the number must have no visible fraction digits.
    pub integer_only: bool,
    pub target: Target,
}

/// Relations joined by `and`. An empty conjunction always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Conjunction {
    pub relations: Vec<Relation>,
}

/// Conjunctions joined by `or`. An empty disjunction never holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Disjunction {
    pub conjunctions: Vec<Conjunction>,
}

impl Disjunction {
    /// The condition that holds for every number.
    pub fn always() -> Self {
        Disjunction {
            conjunctions: vec![Conjunction::default()],
        }
    }

    /// Whether this is the unconditional `other` condition.
    pub fn is_unconditional(&self) -> bool {
        self.conjunctions
            .iter()
            .any(|conjunction| conjunction.relations.is_empty())
    }
}

/// One keyword with its condition and sample annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    keyword: Keyword,
    condition: Disjunction,
    integer_samples: Option<Samples>,
    decimal_samples: Option<Samples>,
}

impl Rule {
    pub(crate) fn new(
        keyword: Keyword,
        condition: Disjunction,
        integer_samples: Option<Samples>,
        decimal_samples: Option<Samples>,
    ) -> Self {
        Rule {
            keyword,
            condition,
            integer_samples,
            decimal_samples,
        }
    }

    fn unconditional_other() -> Self {
        Rule::new(Keyword::other(), Disjunction::always(), None, None)
    }

    pub fn keyword(&self) -> &Keyword {
        &self.keyword
    }

    pub fn condition(&self) -> &Disjunction {
        &self.condition
    }

    pub fn samples(&self, kind: SampleKind) -> Option<&Samples> {
        match kind {
            SampleKind::Integer => self.integer_samples.as_ref(),
            SampleKind::Decimal => self.decimal_samples.as_ref(),
        }
    }

    pub fn matches(&self, operands: &DecimalOperands) -> bool {
        self.condition.is_satisfied(operands)
    }
}

/// Rules in evaluation order: explicit keywords as written, then `other`.
pub type Rules<'a> = Chain<Iter<'a, Rule>, Once<&'a Rule>>;

/// A parsed rule set for one locale.
///
/// Immutable once built; share it freely between threads.
///
/// # Example
///
/// ```
/// use plurals::{DecimalOperands, RuleSet};
///
/// let rules: RuleSet = "one: i = 1 and v = 0".parse().unwrap();
/// assert_eq!(rules.select(&DecimalOperands::from(1.0)), "one");
/// assert_eq!(rules.select(&"1.0".parse().unwrap()), "other");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    explicit: Vec<Rule>,
    other: Rule,
}

impl RuleSet {
    /// Assemble a rule set, synthesizing an unconditional `other` if absent.
    pub(crate) fn from_rules(explicit: Vec<Rule>, other: Option<Rule>) -> Self {
        RuleSet {
            explicit,
            other: other.unwrap_or_else(Rule::unconditional_other),
        }
    }

    /// Parse rule grammar text.
    pub fn parse(source: &str) -> Result<Self, PluralError> {
        parse_rules(source)
    }

    /// The keyword of the first rule whose condition holds.
    ///
    /// Never fails: numbers without operands (NaN, infinities and
    /// magnitudes of 2^63 or more) and numbers no explicit rule matches
    /// both select `other`.
    pub fn select(&self, operands: &DecimalOperands) -> &Keyword {
        let keyword = if operands.has_operands() {
            self.explicit
                .iter()
                .find(|rule| rule.matches(operands))
                .map_or(&self.other.keyword, Rule::keyword)
        } else {
            &self.other.keyword
        };
        trace!(value = operands.signed_value(), %keyword, "selected plural keyword");
        keyword
    }

    /// All rules in evaluation order.
    pub fn rules(&self) -> Rules<'_> {
        self.explicit.iter().chain(once(&self.other))
    }

    /// The rule for `keyword`, if defined.
    pub fn rule(&self, keyword: &str) -> Option<&Rule> {
        self.rules().find(|rule| rule.keyword == keyword)
    }

    /// Number of keywords, `other` included.
    pub fn keyword_count(&self) -> usize {
        self.explicit.len() + 1
    }

    /// Keywords in evaluation order.
    pub fn keywords(&self) -> Keywords<'_> {
        Keywords::new(self)
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    /// The sample annotation of `kind` attached to `keyword`.
    pub fn samples(&self, keyword: &str, kind: SampleKind) -> Option<&Samples> {
        self.rule(keyword).and_then(|rule| rule.samples(kind))
    }

    /// Check every annotated sample against the rules.
    ///
    /// Expands at most `limit` values per sample list and returns each
    /// sample whose selected keyword differs from the keyword it is listed
    /// under.
    pub fn verify_samples(&self, limit: usize) -> Vec<SampleMismatch> {
        let mut mismatches = Vec::new();
        for rule in self.rules() {
            for kind in [SampleKind::Integer, SampleKind::Decimal] {
                let Some(samples) = rule.samples(kind) else {
                    continue;
                };
                for sample in samples.values(limit) {
                    let selected = self.select(&sample);
                    if selected != rule.keyword() {
                        mismatches.push(SampleMismatch {
                            keyword: rule.keyword().clone(),
                            kind,
                            sample,
                            selected: selected.clone(),
                        });
                    }
                }
            }
        }
        mismatches
    }

    pub(crate) fn rule_at(&self, index: usize) -> Option<&Rule> {
        match index.cmp(&self.explicit.len()) {
            Ordering::Less => self.explicit.get(index),
            Ordering::Equal => Some(&self.other),
            Ordering::Greater => None,
        }
    }
}

impl Default for RuleSet {
    /// The rule set with only `other`.
    fn default() -> Self {
        RuleSet::from_rules(Vec::new(), None)
    }
}

impl FromStr for RuleSet {
    type Err = PluralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rules(s)
    }
}
