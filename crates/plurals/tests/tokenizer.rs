//! Tests for the rule grammar tokenizer.

use plurals::parser::{LexMode, Lexer, TokenKind, next_token};
use plurals::{PluralError, PluralOperand, SyntaxErrorKind};

fn kinds(source: &str, mode: LexMode) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(source);
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token(mode).unwrap();
        if token.kind == TokenKind::Eof {
            return kinds;
        }
        kinds.push(token.kind);
    }
}

// =========================================================================
// Expression Position
// =========================================================================

#[test]
fn relation_tokens() {
    assert_eq!(
        kinds("n % 10 = 2..4", LexMode::Expression),
        vec![
            TokenKind::Operand(PluralOperand::N),
            TokenKind::Mod,
            TokenKind::Number,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Range,
            TokenKind::Number,
        ]
    );
}

#[test]
fn reserved_words() {
    assert_eq!(
        kinds("and or mod not in is within", LexMode::Expression),
        vec![
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Mod,
            TokenKind::Not,
            TokenKind::In,
            TokenKind::Is,
            TokenKind::Within,
        ]
    );
}

#[test]
fn all_operand_letters() {
    let found = kinds("n i f t v w e c", LexMode::Expression);
    let expected: Vec<TokenKind> = PluralOperand::ALL
        .iter()
        .map(|&op| TokenKind::Operand(op))
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn not_equal_and_punctuation() {
    assert_eq!(
        kinds("!= , ; : .", LexMode::Expression),
        vec![
            TokenKind::NotEqual,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Dot,
        ]
    );
}

#[test]
fn sample_markers_in_expression_position() {
    assert_eq!(
        kinds("@integer @decimal", LexMode::Expression),
        vec![TokenKind::IntegerSamples, TokenKind::DecimalSamples]
    );
}

#[test]
fn numbers_are_greedy() {
    let (token, end) = next_token("12345 and", 0, LexMode::Expression).unwrap();
    assert_eq!(token.kind, TokenKind::Number);
    assert_eq!(token.text, "12345");
    assert_eq!(end, 5);
}

#[test]
fn whitespace_and_line_breaks_are_skipped() {
    let (token, _) = next_token("  \n\t one", 0, LexMode::Keyword).unwrap();
    assert_eq!(token.kind, TokenKind::Keyword);
    assert_eq!(token.text, "one");
    assert_eq!(token.position, 5);
}

#[test]
fn multi_letter_identifier_rejected_in_expression_position() {
    let err = next_token("nn", 0, LexMode::Expression).unwrap_err();
    match err {
        PluralError::Syntax(e) => {
            assert!(matches!(e.kind, SyntaxErrorKind::UnknownWord { ref word, .. } if word == "nn"));
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn misspelled_operator_gets_suggestions() {
    let err = next_token("withn", 0, LexMode::Expression).unwrap_err();
    let PluralError::Syntax(e) = err else {
        panic!("expected syntax error");
    };
    let SyntaxErrorKind::UnknownWord { suggestions, .. } = e.kind else {
        panic!("expected unknown word");
    };
    assert_eq!(suggestions, vec!["within".to_string()]);
}

#[test]
fn retired_operand_is_unsupported() {
    let err = next_token("  j", 0, LexMode::Expression).unwrap_err();
    assert!(matches!(
        err,
        PluralError::UnsupportedOperand { ref operand, position: 2, .. } if operand == "j"
    ));
}

#[test]
fn unrecognized_character() {
    let err = next_token("n # 1", 1, LexMode::Expression).unwrap_err();
    let PluralError::Syntax(e) = err else {
        panic!("expected syntax error");
    };
    assert_eq!(e.kind, SyntaxErrorKind::UnexpectedCharacter('#'));
    assert_eq!(e.position, 2);
    assert_eq!((e.line, e.column), (1, 3));
}

// =========================================================================
// Keyword Position
// =========================================================================

#[test]
fn any_identifier_is_a_keyword() {
    for word in ["one", "other", "and", "n", "zero_2"] {
        let (token, _) = next_token(word, 0, LexMode::Keyword).unwrap();
        assert_eq!(token.kind, TokenKind::Keyword, "{word}");
    }
}

// =========================================================================
// Sample Position
// =========================================================================

#[test]
fn sample_list_tokens() {
    assert_eq!(
        kinds("0.0~1.5, 1c6, …", LexMode::Samples),
        vec![
            TokenKind::Sample,
            TokenKind::Tilde,
            TokenKind::Sample,
            TokenKind::Comma,
            TokenKind::Sample,
            TokenKind::Comma,
            TokenKind::Ellipsis,
        ]
    );
}

#[test]
fn ascii_ellipsis_in_samples() {
    assert_eq!(
        kinds("1, ...", LexMode::Samples),
        vec![TokenKind::Sample, TokenKind::Comma, TokenKind::Ellipsis]
    );
}

#[test]
fn sample_literal_text() {
    let (token, end) = next_token("1.0000001c6;", 0, LexMode::Samples).unwrap();
    assert_eq!(token.text, "1.0000001c6");
    assert_eq!(end, 11);
}

// =========================================================================
// End Of Input
// =========================================================================

#[test]
fn eof_at_and_past_end() {
    let (token, end) = next_token("one", 3, LexMode::Keyword).unwrap();
    assert_eq!(token.kind, TokenKind::Eof);
    assert_eq!(end, 3);

    let (token, _) = next_token("one", 40, LexMode::Keyword).unwrap();
    assert_eq!(token.kind, TokenKind::Eof);
}

#[test]
fn peek_does_not_advance() {
    let mut lexer = Lexer::new("n is 1");
    let peeked = lexer.peek(LexMode::Expression).unwrap();
    let taken = lexer.next_token(LexMode::Expression).unwrap();
    assert_eq!(peeked, taken);
    assert_eq!(lexer.position(), 1);
}
