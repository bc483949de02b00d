//! Error types for plural rule construction and decimal literal parsing.

use std::collections::TryReserveError;
use std::fmt;

use strsim::levenshtein;
use thiserror::Error;

use crate::rules::SampleKind;

/// An error that occurred while building a rule set.
///
/// Construction is the only fallible step: once a [`RuleSet`](crate::RuleSet)
/// exists, selecting a keyword for a number always succeeds.
#[derive(Debug, Error)]
pub enum PluralError {
    /// Malformed rule grammar text.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The grammar names an operand that cannot be computed for a number.
    #[error("unsupported plural operand '{operand}' at {line}:{column}")]
    UnsupportedOperand {
        operand: String,
        position: usize,
        line: usize,
        column: usize,
    },

    /// The rule tree could not grow.
    #[error("allocation failed while building rule set: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl PluralError {
    /// Byte offset of the offending input, when the error has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            PluralError::Syntax(err) => Some(err.position),
            PluralError::UnsupportedOperand { position, .. } => Some(*position),
            PluralError::AllocationFailure(_) => None,
        }
    }

    pub(crate) fn unsupported_operand(source: &str, position: usize, operand: &str) -> Self {
        let (line, column) = calculate_position(source, position);
        PluralError::UnsupportedOperand {
            operand: operand.to_string(),
            position,
            line,
            column,
        }
    }
}

/// A syntax error with the position of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at {line}:{column}: {kind}")]
pub struct SyntaxError {
    /// Byte offset into the rule text.
    pub position: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub(crate) fn at(source: &str, position: usize, kind: SyntaxErrorKind) -> Self {
        let (line, column) = calculate_position(source, position);
        SyntaxError {
            position,
            line,
            column,
            kind,
        }
    }
}

/// What went wrong at a [`SyntaxError`] position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// A token that is not valid in the current parser state.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: Expected, found: String },

    /// A character that starts no token.
    #[error("unrecognized character '{0}'")]
    UnexpectedCharacter(char),

    /// An identifier in expression position that is neither an operator nor an operand.
    #[error("unknown word '{word}'{}", suggestion_hint(.suggestions))]
    UnknownWord {
        word: String,
        suggestions: Vec<String>,
    },

    /// A keyword defined by two rule groups.
    #[error("duplicate keyword '{0}'")]
    DuplicateKeyword(String),

    /// `other` written with a condition.
    #[error("'other' must not have a condition")]
    ConditionalOther,

    /// A keyword other than `other` written without a condition.
    #[error("keyword '{0}' has no condition")]
    MissingCondition(String),

    /// `mod` not followed by a positive integer.
    #[error("'mod' must be followed by a positive integer")]
    InvalidModulus,

    /// A number literal that does not fit the rule tree.
    #[error("number '{0}' is out of range")]
    NumberOutOfRange(String),

    /// A range whose low bound exceeds its high bound.
    #[error("range {low}..{high} is empty")]
    InvalidRange { low: u64, high: u64 },

    /// A malformed sample annotation entry.
    #[error("invalid sample '{sample}': {reason}")]
    InvalidSample { sample: String, reason: String },

    /// A second `@integer` or `@decimal` list in one rule.
    #[error("duplicate '@{0}' samples")]
    DuplicateSamples(SampleKind),
}

/// The token class a parser state was waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Keyword,
    Colon,
    Operand,
    Operator,
    RangeOperator,
    Value,
    Continuation,
    Sample,
    SampleSeparator,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Expected::Keyword => "a keyword",
            Expected::Colon => "':'",
            Expected::Operand => "an operand (n, i, f, t, v, w, e, c)",
            Expected::Operator => "'is', 'in', 'within', 'not', '=', '!=' or 'mod'",
            Expected::RangeOperator => "'in' or 'within'",
            Expected::Value => "a number",
            Expected::Continuation => "'and', 'or', ';' or a sample list",
            Expected::Sample => "a sample number",
            Expected::SampleSeparator => "',', '~', ';' or a sample list",
        };
        f.write_str(text)
    }
}

/// An error parsing a decimal literal such as `1.20` or `1.2c6`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalParseError {
    #[error("invalid decimal literal '{0}'")]
    Invalid(String),

    #[error("decimal literal '{0}' is out of range")]
    OutOfRange(String),
}

/// Suggest close matches for a misspelled word.
///
/// Uses Levenshtein distance:
/// - max distance 1 for words of 3 characters or fewer
/// - max distance 2 otherwise
/// - at most 3 suggestions, closest first
pub fn compute_suggestions(word: &str, available: &[&str]) -> Vec<String> {
    let max_distance = if word.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(word, candidate);
            (dist > 0 && dist <= max_distance).then_some((dist, *candidate))
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Calculate 1-based line and column for a byte offset.
fn calculate_position(source: &str, position: usize) -> (usize, usize) {
    let consumed = source.get(..position).unwrap_or(source);
    let line = consumed.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => consumed.len() - pos,
        None => consumed.len() + 1,
    };
    (line, column)
}
