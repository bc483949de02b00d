//! Tests for rule construction errors.

use plurals::{Expected, PluralError, SampleKind, SyntaxError, SyntaxErrorKind, parse_rules};

fn syntax_error(source: &str) -> SyntaxError {
    match parse_rules(source) {
        Err(PluralError::Syntax(e)) => e,
        other => panic!("expected syntax error for {source:?}, got {other:?}"),
    }
}

fn message(source: &str) -> String {
    parse_rules(source).unwrap_err().to_string()
}

// =========================================================================
// Keywords
// =========================================================================

#[test]
fn duplicate_keyword() {
    let e = syntax_error("one: n is 1; few: n is 2; few: n is 3");
    assert_eq!(e.kind, SyntaxErrorKind::DuplicateKeyword("few".to_string()));
    assert_eq!(e.position, 26);
    insta::assert_snapshot!(e.to_string(), @"syntax error at 1:27: duplicate keyword 'few'");
}

#[test]
fn duplicate_other() {
    let e = syntax_error("other: ; one: n is 1; other:");
    assert_eq!(e.kind, SyntaxErrorKind::DuplicateKeyword("other".to_string()));
}

#[test]
fn conditional_other() {
    insta::assert_snapshot!(
        message("other: n is 1"),
        @"syntax error at 1:8: 'other' must not have a condition"
    );
}

#[test]
fn missing_condition() {
    insta::assert_snapshot!(
        message("one: ; two: n is 2"),
        @"syntax error at 1:6: keyword 'one' has no condition"
    );
    let e = syntax_error("one: @integer 1");
    assert_eq!(e.kind, SyntaxErrorKind::MissingCondition("one".to_string()));
}

#[test]
fn missing_colon() {
    insta::assert_snapshot!(
        message("one n is 1"),
        @"syntax error at 1:5: expected ':', found 'n'"
    );
}

#[test]
fn number_in_keyword_position() {
    let e = syntax_error("1: n is 1");
    assert!(matches!(
        e.kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: Expected::Keyword,
            ..
        }
    ));
}

// =========================================================================
// Relations
// =========================================================================

#[test]
fn missing_value() {
    insta::assert_snapshot!(
        message("one: n is"),
        @"syntax error at 1:10: expected a number, found end of input"
    );
}

#[test]
fn missing_operand() {
    let e = syntax_error("one: is 1");
    assert!(matches!(
        e.kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: Expected::Operand,
            ..
        }
    ));
}

#[test]
fn missing_operator() {
    let e = syntax_error("one: n 1");
    assert!(matches!(
        e.kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: Expected::Operator,
            ..
        }
    ));
}

#[test]
fn not_without_range_operator() {
    let e = syntax_error("one: n not 1");
    assert!(matches!(
        e.kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: Expected::RangeOperator,
            ..
        }
    ));
}

#[test]
fn zero_modulus() {
    insta::assert_snapshot!(
        message("one: n mod 0 = 1"),
        @"syntax error at 1:12: 'mod' must be followed by a positive integer"
    );
}

#[test]
fn modulus_without_number() {
    let e = syntax_error("one: n % = 1");
    assert_eq!(e.kind, SyntaxErrorKind::InvalidModulus);
}

#[test]
fn empty_range() {
    insta::assert_snapshot!(
        message("few: n in 4..2"),
        @"syntax error at 1:11: range 4..2 is empty"
    );
}

#[test]
fn number_out_of_range() {
    insta::assert_snapshot!(
        message("one: n is 99999999999999999999"),
        @"syntax error at 1:11: number '99999999999999999999' is out of range"
    );
}

#[test]
fn dangling_and() {
    let e = syntax_error("one: n is 1 and");
    assert!(matches!(
        e.kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: Expected::Operand,
            ..
        }
    ));
}

#[test]
fn trailing_comma_in_range_list() {
    let e = syntax_error("one: n = 1,");
    assert!(matches!(
        e.kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: Expected::Value,
            ..
        }
    ));
}

#[test]
fn unknown_word_with_suggestions() {
    insta::assert_snapshot!(
        message("one: n iz 1"),
        @"syntax error at 1:8: unknown word 'iz', did you mean: in, is, i?"
    );
}

#[test]
fn missing_semicolon_between_rules() {
    let e = syntax_error("one: n is 1\nfew: n is 2");
    assert_eq!((e.line, e.column), (2, 1));
    assert!(matches!(e.kind, SyntaxErrorKind::UnknownWord { ref word, .. } if word == "few"));
}

#[test]
fn unrecognized_character() {
    insta::assert_snapshot!(
        message("one: n is 1 & n is 2"),
        @"syntax error at 1:13: unrecognized character '&'"
    );
}

#[test]
fn retired_operand() {
    let err = parse_rules("one: j is 1").unwrap_err();
    assert_eq!(err.position(), Some(5));
    insta::assert_snapshot!(err.to_string(), @"unsupported plural operand 'j' at 1:6");
}

// =========================================================================
// Samples
// =========================================================================

#[test]
fn fraction_in_integer_samples() {
    insta::assert_snapshot!(
        message("one: n is 1 @integer 1.5"),
        @"syntax error at 1:22: invalid sample '1.5': integer samples must not have fraction digits"
    );
}

#[test]
fn mismatched_sample_range() {
    insta::assert_snapshot!(
        message("other: @decimal 1.5~1.25"),
        @"syntax error at 1:17: invalid sample '1.5~1.25': range ends have different fraction digit counts"
    );
}

#[test]
fn descending_sample_range() {
    let e = syntax_error("other: @integer 5~2");
    assert_eq!(
        e.kind,
        SyntaxErrorKind::InvalidSample {
            sample: "5~2".to_string(),
            reason: "range is empty".to_string(),
        }
    );
}

#[test]
fn malformed_sample() {
    let e = syntax_error("other: @decimal 1.2.3");
    assert!(matches!(e.kind, SyntaxErrorKind::InvalidSample { ref sample, .. } if sample == "1.2.3"));
}

#[test]
fn duplicate_samples() {
    let e = syntax_error("one: n is 1 @integer 1 @integer 2");
    assert_eq!(e.kind, SyntaxErrorKind::DuplicateSamples(SampleKind::Integer));
    insta::assert_snapshot!(e.to_string(), @"syntax error at 1:24: duplicate '@integer' samples");
}

#[test]
fn empty_sample_list() {
    insta::assert_snapshot!(
        message("other: @integer"),
        @"syntax error at 1:16: expected a sample number, found end of input"
    );
}

#[test]
fn ellipsis_must_follow_a_sample() {
    let e = syntax_error("other: @integer …");
    assert!(matches!(
        e.kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: Expected::Sample,
            ..
        }
    ));
}

#[test]
fn samples_after_ellipsis() {
    let e = syntax_error("other: @integer 1, …, 2");
    assert!(matches!(
        e.kind,
        SyntaxErrorKind::UnexpectedToken {
            expected: Expected::SampleSeparator,
            ..
        }
    ));
}

#[test]
fn missing_sample_separator() {
    insta::assert_snapshot!(
        message("other: @integer 1 2"),
        @"syntax error at 1:19: expected ',', '~', ';' or a sample list, found '2'"
    );
}

// =========================================================================
// Positions
// =========================================================================

#[test]
fn errors_carry_byte_positions() {
    let source = "one: i = 1 and v = 0;\nfew: n in 2..x";
    let err = parse_rules(source).unwrap_err();
    let position = err.position().unwrap();
    assert_eq!(&source[position..], "x");
}
