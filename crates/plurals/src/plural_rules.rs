//! Shareable classifier over one parsed rule set.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::PluralError;
use crate::operands::{DecimalOperands, FormatHints};
use crate::rules::{Keyword, Keywords, RuleSet, SampleKind, Samples};

/// A locale's plural rules, cheap to clone and safe to share across threads.
///
/// Cloning shares the parsed rule tree; classification never mutates it.
///
/// # Example
///
/// ```
/// use plurals::PluralRules;
///
/// let rules = PluralRules::new(
///     "one: v = 0 and i % 10 = 1 and i % 100 != 11; \
///      few: v = 0 and i % 10 = 2..4 and i % 100 != 12..14; \
///      many: v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14",
/// )
/// .unwrap();
/// assert_eq!(rules.select(21.0), "one");
/// assert_eq!(rules.select(23.0), "few");
/// assert_eq!(rules.select(11.0), "many");
/// assert_eq!(rules.select(1.5), "other");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralRules {
    rules: Arc<RuleSet>,
}

impl PluralRules {
    /// Parse rule grammar text.
    pub fn new(source: &str) -> Result<Self, PluralError> {
        Ok(PluralRules::from(RuleSet::parse(source)?))
    }

    /// The keyword for `value` displayed in its shortest form.
    pub fn select(&self, value: f64) -> &Keyword {
        self.rules.select(&DecimalOperands::from(value))
    }

    /// The keyword for `value` displayed according to `hints`.
    pub fn select_with_hints(&self, value: f64, hints: &FormatHints) -> &Keyword {
        self.rules.select(&DecimalOperands::with_hints(value, hints))
    }

    /// The keyword for an already computed operand view.
    pub fn select_operands(&self, operands: &DecimalOperands) -> &Keyword {
        self.rules.select(operands)
    }

    pub fn keywords(&self) -> Keywords<'_> {
        self.rules.keywords()
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        self.rules.is_keyword(name)
    }

    pub fn samples(&self, keyword: &str, kind: SampleKind) -> Option<&Samples> {
        self.rules.samples(keyword, kind)
    }

    /// The underlying rule set.
    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }
}

impl From<RuleSet> for PluralRules {
    fn from(rules: RuleSet) -> Self {
        PluralRules {
            rules: Arc::new(rules),
        }
    }
}

impl FromStr for PluralRules {
    type Err = PluralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PluralRules::new(s)
    }
}
