//! Rule grammar tokenizer.
//!
//! Scans rule text one token at a time. The parser tells the tokenizer
//! which position it is in, because the same characters mean different
//! things in different places:
//! - keyword position accepts any identifier as a category name
//! - expression position accepts only operators and operand letters
//! - sample position reads decimal literals such as `1.0` or `1c6`

use winnow::ascii::{digit1, multispace0};
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::error::{PluralError, SyntaxError, SyntaxErrorKind, compute_suggestions};
use crate::operands::PluralOperand;

/// Reserved words and operand letters legal in expression position.
const EXPRESSION_WORDS: &[&str] = &[
    "and", "or", "mod", "not", "in", "is", "within", "n", "i", "f", "t", "v", "w", "e", "c",
];

/// Operands the grammar once had but which are no longer computed.
const RETIRED_OPERANDS: &[&str] = &["j"];

/// The class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Unsigned integer literal.
    Number,
    /// Category name, in keyword position.
    Keyword,
    And,
    Or,
    /// `mod` or `%`.
    Mod,
    Not,
    In,
    Is,
    Within,
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    Operand(PluralOperand),
    Comma,
    Semicolon,
    Colon,
    Dot,
    /// `..`
    Range,
    /// `…` or `...`
    Ellipsis,
    Tilde,
    /// `@integer`
    IntegerSamples,
    /// `@decimal`
    DecimalSamples,
    /// Decimal literal, in sample position.
    Sample,
    Eof,
}

/// Where the parser is, which decides how identifiers and digits are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexMode {
    Keyword,
    Expression,
    Samples,
}

/// A token with its source text and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

impl Token<'_> {
    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// Scan the token starting at or after `position`.
///
/// Returns the token and the position just past it. Whitespace and line
/// breaks before the token are skipped. A position past the end of the
/// input, or inside a multi-byte character, reads as end of input.
pub fn next_token(
    source: &str,
    position: usize,
    mode: LexMode,
) -> Result<(Token<'_>, usize), PluralError> {
    let Some(rest) = source.get(position..) else {
        let eof = Token {
            kind: TokenKind::Eof,
            text: "",
            position: source.len(),
        };
        return Ok((eof, source.len()));
    };

    let mut input = rest;
    let _ = skip_whitespace(&mut input);
    let start = source.len() - input.len();

    if input.is_empty() {
        let eof = Token {
            kind: TokenKind::Eof,
            text: "",
            position: start,
        };
        return Ok((eof, start));
    }

    let scanned = match mode {
        LexMode::Samples => sample_token.parse_next(&mut input),
        LexMode::Keyword | LexMode::Expression => grammar_token.parse_next(&mut input),
    };
    let end = source.len() - input.len();
    let text = &source[start..end];

    let kind = match scanned {
        Ok(Scanned::Fixed(kind)) => kind,
        Ok(Scanned::Word) => classify_word(source, start, text, mode)?,
        Err(_) => {
            let c = source[start..].chars().next().unwrap_or('\u{FFFD}');
            return Err(SyntaxError::at(source, start, SyntaxErrorKind::UnexpectedCharacter(c)).into());
        }
    };

    let token = Token {
        kind,
        text,
        position: start,
    };
    Ok((token, end))
}

/// What a scanner recognized before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scanned {
    Fixed(TokenKind),
    Word,
}

/// Spaces, tabs and line breaks between tokens.
fn skip_whitespace(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

/// Punctuation, operators, numbers and words.
fn grammar_token(input: &mut &str) -> ModalResult<Scanned> {
    alt((
        punctuation.map(Scanned::Fixed),
        sample_marker.map(Scanned::Fixed),
        digit1.value(Scanned::Fixed(TokenKind::Number)),
        word.value(Scanned::Word),
    ))
    .parse_next(input)
}

/// Decimal literals and the separators of a sample list.
fn sample_token(input: &mut &str) -> ModalResult<Scanned> {
    alt((
        sample_literal.value(TokenKind::Sample),
        "…".value(TokenKind::Ellipsis),
        "...".value(TokenKind::Ellipsis),
        ','.value(TokenKind::Comma),
        ';'.value(TokenKind::Semicolon),
        '~'.value(TokenKind::Tilde),
        sample_marker,
    ))
    .map(Scanned::Fixed)
    .parse_next(input)
}

fn punctuation(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        "..".value(TokenKind::Range),
        '.'.value(TokenKind::Dot),
        "…".value(TokenKind::Ellipsis),
        "!=".value(TokenKind::NotEqual),
        '='.value(TokenKind::Equal),
        '%'.value(TokenKind::Mod),
        ','.value(TokenKind::Comma),
        ';'.value(TokenKind::Semicolon),
        ':'.value(TokenKind::Colon),
        '~'.value(TokenKind::Tilde),
    ))
    .parse_next(input)
}

fn sample_marker(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        "@integer".value(TokenKind::IntegerSamples),
        "@decimal".value(TokenKind::DecimalSamples),
    ))
    .parse_next(input)
}

/// A letter followed by letters, digits or underscores.
fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Digits followed by any of digits, `.`, `c` and `e`; validated later.
fn sample_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        digit1,
        take_while(0.., |c: char| c.is_ascii_digit() || matches!(c, '.' | 'c' | 'e')),
    )
        .take()
        .parse_next(input)
}

/// Classify an identifier by lexing position.
fn classify_word(
    source: &str,
    position: usize,
    word: &str,
    mode: LexMode,
) -> Result<TokenKind, PluralError> {
    if mode == LexMode::Keyword {
        return Ok(TokenKind::Keyword);
    }

    let kind = match word {
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "mod" => TokenKind::Mod,
        "not" => TokenKind::Not,
        "in" => TokenKind::In,
        "is" => TokenKind::Is,
        "within" => TokenKind::Within,
        _ => {
            let mut chars = word.chars();
            match (chars.next().and_then(PluralOperand::from_char), chars.next()) {
                (Some(operand), None) => TokenKind::Operand(operand),
                _ if RETIRED_OPERANDS.contains(&word) => {
                    return Err(PluralError::unsupported_operand(source, position, word));
                }
                _ => {
                    let kind = SyntaxErrorKind::UnknownWord {
                        word: word.to_string(),
                        suggestions: compute_suggestions(word, EXPRESSION_WORDS),
                    };
                    return Err(SyntaxError::at(source, position, kind).into());
                }
            }
        }
    };
    Ok(kind)
}

/// A cursor over rule text.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            position: 0,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self, mode: LexMode) -> Result<Token<'a>, PluralError> {
        let (token, end) = next_token(self.source, self.position, mode)?;
        self.position = end;
        Ok(token)
    }

    /// Return the next token without consuming it.
    pub fn peek(&self, mode: LexMode) -> Result<Token<'a>, PluralError> {
        next_token(self.source, self.position, mode).map(|(token, _)| token)
    }

    /// Consume the next token if it has the given kind.
    pub fn consume_if(&mut self, mode: LexMode, kind: TokenKind) -> Result<bool, PluralError> {
        if self.peek(mode)?.kind == kind {
            self.next_token(mode)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
