//! Miette diagnostic wrapper for plural rule errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use plurals::{PluralError, SyntaxErrorKind};
use thiserror::Error;

/// A miette-compatible diagnostic for plural rule errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid plural rules: {message}")]
#[diagnostic(code(plurals::syntax))]
pub struct RuleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl RuleDiagnostic {
    /// Create a diagnostic from a PluralError with source context.
    ///
    /// `name` labels the source, usually a file path or `<rules>`.
    pub fn from_plural_error(name: &str, content: &str, err: &PluralError) -> Self {
        let (message, help, width) = match err {
            PluralError::Syntax(syntax) => {
                let width = match &syntax.kind {
                    SyntaxErrorKind::UnknownWord { word, .. } => word.len(),
                    _ => 1,
                };
                (syntax.kind.to_string(), help_for(&syntax.kind), width)
            }
            PluralError::UnsupportedOperand { operand, .. } => (
                format!("unsupported plural operand '{}'", operand),
                Some("operands are n, i, f, t, v, w, e and c".to_string()),
                operand.len(),
            ),
            PluralError::AllocationFailure(_) => (err.to_string(), None, 0),
        };

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = err.position().unwrap_or(0).min(content.len());
        let width = width.min(content.len() - offset);

        RuleDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, width).into(),
            message,
            help,
        }
    }
}

fn help_for(kind: &SyntaxErrorKind) -> Option<String> {
    match kind {
        SyntaxErrorKind::ConditionalOther => {
            Some("'other' matches every number no other keyword matches".to_string())
        }
        SyntaxErrorKind::MissingCondition(_) => {
            Some("only 'other' may be written without a condition".to_string())
        }
        SyntaxErrorKind::DuplicateKeyword(_) => {
            Some("merge the conditions with 'or'".to_string())
        }
        SyntaxErrorKind::InvalidRange { low, high } => {
            Some(format!("did you mean {}..{}?", high, low))
        }
        SyntaxErrorKind::UnknownWord { suggestions, .. } if suggestions.is_empty() => {
            Some("rules separate keywords with ';'".to_string())
        }
        _ => None,
    }
}
