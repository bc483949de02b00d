//! Rule grammar tokenizer and parser.
//!
//! The tokenizer is exposed for tooling that needs token positions; most
//! callers only want [`parse_rules`].

mod rules;
pub mod token;

pub use rules::parse_rules;
pub use token::{LexMode, Lexer, Token, TokenKind, next_token};
