//! CLDR plural rules: parse a locale's rule grammar once, then pick the
//! plural keyword (`one`, `few`, `other`, ...) for any number.
//!
//! Rules test the digits of a number as displayed, so `1` and `1.0` can
//! select different keywords. [`DecimalOperands`] computes those digits from
//! a double or a decimal literal.
//!
//! # Example
//!
//! ```
//! use plurals::{DecimalOperands, FormatHints, PluralRules};
//!
//! let rules = PluralRules::new("one: i = 1 and v = 0").unwrap();
//! assert_eq!(rules.select(1.0), "one");
//!
//! let hints = FormatHints::builder().visible_fraction_digits(1).build();
//! assert_eq!(rules.select_with_hints(1.0, &hints), "other");
//!
//! let operands: DecimalOperands = "1.0".parse().unwrap();
//! assert_eq!(rules.select_operands(&operands), "other");
//! ```

pub mod error;
pub mod operands;
pub mod parser;
pub mod plural_rules;
pub mod rules;

pub use error::{
    DecimalParseError, Expected, PluralError, SyntaxError, SyntaxErrorKind, compute_suggestions,
};
pub use operands::{DecimalOperands, FormatHints, PluralOperand, ShortestDecimal};
pub use parser::parse_rules;
pub use plural_rules::PluralRules;
pub use rules::{
    Conjunction, Disjunction, Keyword, Keywords, OTHER, Range, Relation, Rule, RuleSet,
    SampleKind, SampleMismatch, SampleRange, Samples, Target,
};
