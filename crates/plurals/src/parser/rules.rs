//! Grammar parser: rule text to [`RuleSet`].
//!
//! A single pass over the token stream driven by [`ParseState`]. Each state
//! consumes the tokens it owns and names the state that follows, so an
//! error always points at the first token the current state cannot accept.

use std::mem;

use tracing::debug;

use super::token::{LexMode, Lexer, Token, TokenKind};
use crate::error::{Expected, PluralError, SyntaxError, SyntaxErrorKind};
use crate::operands::{DecimalOperands, PluralOperand};
use crate::rules::{
    Conjunction, Disjunction, Keyword, OTHER, Range, Relation, Rule, RuleSet, SampleKind,
    SampleRange, Samples, Target,
};

/// Parse rule grammar text into a rule set.
///
/// Rule groups are separated by `;`. An `other` group is synthesized when
/// the text has none.
///
/// # Example
///
/// ```
/// use plurals::parse_rules;
///
/// let rules = parse_rules("one: i = 1 and v = 0; few: n % 10 = 2..4").unwrap();
/// let keywords: Vec<&str> = rules.keywords().map(|k| k.as_str()).collect();
/// assert_eq!(keywords, ["one", "few", "other"]);
/// ```
pub fn parse_rules(source: &str) -> Result<RuleSet, PluralError> {
    let rules = RuleParser::new(source).run()?;
    debug!(keywords = rules.keyword_count(), "parsed plural rules");
    Ok(rules)
}

/// What the parser expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// A keyword and `:`, or the end of input.
    Keyword,
    /// An operand, optional `mod`, and a relational operator.
    Expr,
    /// The single value after `is` or `is not`.
    Value,
    /// Values and ranges after `=`, `!=`, `in` or `within`.
    RangeList,
    /// A sample list after `@integer` or `@decimal`.
    Samples(SampleKind),
}

/// A relation whose operator has been read but not its target.
#[derive(Debug, Clone, Copy)]
struct PendingRelation {
    operand: PluralOperand,
    modulus: Option<u64>,
    negated: bool,
    integer_only: bool,
}

impl PendingRelation {
    fn with_target(self, target: Target) -> Relation {
        Relation {
            operand: self.operand,
            modulus: self.modulus,
            negated: self.negated,
            integer_only: self.integer_only,
            target,
        }
    }
}

/// The rule group being read.
struct PendingRule {
    keyword: Keyword,
    conjunctions: Vec<Conjunction>,
    relations: Vec<Relation>,
    integer_samples: Option<Samples>,
    decimal_samples: Option<Samples>,
}

struct RuleParser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    explicit: Vec<Rule>,
    other: Option<Rule>,
    rule: Option<PendingRule>,
    relation: Option<PendingRelation>,
}

impl<'a> RuleParser<'a> {
    fn new(source: &'a str) -> Self {
        RuleParser {
            source,
            lexer: Lexer::new(source),
            explicit: Vec::new(),
            other: None,
            rule: None,
            relation: None,
        }
    }

    fn run(mut self) -> Result<RuleSet, PluralError> {
        let mut state = Some(ParseState::Keyword);
        while let Some(current) = state {
            state = match current {
                ParseState::Keyword => self.keyword()?,
                ParseState::Expr => Some(self.expr()?),
                ParseState::Value => Some(self.value()?),
                ParseState::RangeList => Some(self.range_list()?),
                ParseState::Samples(kind) => self.samples(kind)?,
            };
        }
        Ok(RuleSet::from_rules(self.explicit, self.other))
    }

    // === States ===

    fn keyword(&mut self) -> Result<Option<ParseState>, PluralError> {
        let token = loop {
            let token = self.lexer.next_token(LexMode::Keyword)?;
            if token.kind != TokenKind::Semicolon {
                break token;
            }
        };
        match token.kind {
            TokenKind::Eof => return Ok(None),
            TokenKind::Keyword => {}
            _ => return Err(self.unexpected(&token, Expected::Keyword)),
        }

        let keyword = Keyword::from(token.text);
        if self.is_defined(&keyword) {
            return Err(self.error(
                &token,
                SyntaxErrorKind::DuplicateKeyword(keyword.to_string()),
            ));
        }
        let colon = self.lexer.next_token(LexMode::Expression)?;
        if colon.kind != TokenKind::Colon {
            return Err(self.unexpected(&colon, Expected::Colon));
        }

        let next = self.lexer.peek(LexMode::Expression)?;
        let has_condition = !matches!(
            next.kind,
            TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::IntegerSamples
                | TokenKind::DecimalSamples
        );
        if keyword.is_other() && has_condition {
            return Err(self.error(&next, SyntaxErrorKind::ConditionalOther));
        }
        if !keyword.is_other() && !has_condition {
            return Err(self.error(
                &next,
                SyntaxErrorKind::MissingCondition(keyword.to_string()),
            ));
        }

        self.rule = Some(PendingRule {
            keyword,
            conjunctions: Vec::new(),
            relations: Vec::new(),
            integer_samples: None,
            decimal_samples: None,
        });
        if has_condition {
            Ok(Some(ParseState::Expr))
        } else {
            self.after_condition()
        }
    }

    fn expr(&mut self) -> Result<ParseState, PluralError> {
        let token = self.lexer.next_token(LexMode::Expression)?;
        let TokenKind::Operand(operand) = token.kind else {
            return Err(self.unexpected(&token, Expected::Operand));
        };

        let modulus = if self.lexer.consume_if(LexMode::Expression, TokenKind::Mod)? {
            let divisor = self.lexer.next_token(LexMode::Expression)?;
            if divisor.kind != TokenKind::Number {
                return Err(self.error(&divisor, SyntaxErrorKind::InvalidModulus));
            }
            match self.number(&divisor)? {
                0 => return Err(self.error(&divisor, SyntaxErrorKind::InvalidModulus)),
                modulus => Some(modulus),
            }
        } else {
            None
        };

        let mut relation = PendingRelation {
            operand,
            modulus,
            negated: false,
            integer_only: false,
        };
        let operator = self.lexer.next_token(LexMode::Expression)?;
        let next = match operator.kind {
            TokenKind::Is => {
                relation.negated = self.lexer.consume_if(LexMode::Expression, TokenKind::Not)?;
                ParseState::Value
            }
            TokenKind::Equal | TokenKind::In => {
                relation.negated = self.lexer.consume_if(LexMode::Expression, TokenKind::Not)?;
                ParseState::RangeList
            }
            TokenKind::NotEqual => {
                relation.negated = true;
                ParseState::RangeList
            }
            TokenKind::Within => {
                relation.negated = self.lexer.consume_if(LexMode::Expression, TokenKind::Not)?;
                relation.integer_only = true;
                ParseState::RangeList
            }
            TokenKind::Not => {
                let range_operator = self.lexer.next_token(LexMode::Expression)?;
                match range_operator.kind {
                    TokenKind::In => {}
                    TokenKind::Within => relation.integer_only = true,
                    _ => return Err(self.unexpected(&range_operator, Expected::RangeOperator)),
                }
                relation.negated = true;
                ParseState::RangeList
            }
            _ => return Err(self.unexpected(&operator, Expected::Operator)),
        };
        self.relation = Some(relation);
        Ok(next)
    }

    fn value(&mut self) -> Result<ParseState, PluralError> {
        let token = self.lexer.next_token(LexMode::Expression)?;
        if token.kind != TokenKind::Number {
            return Err(self.unexpected(&token, Expected::Value));
        }
        let value = self.number(&token)?;
        self.finish_relation(Target::Value(value))?;
        self.continuation()
    }

    fn range_list(&mut self) -> Result<ParseState, PluralError> {
        let mut ranges = Vec::new();
        loop {
            let low_token = self.lexer.next_token(LexMode::Expression)?;
            if low_token.kind != TokenKind::Number {
                return Err(self.unexpected(&low_token, Expected::Value));
            }
            let low = self.number(&low_token)?;

            let range = if self.lexer.consume_if(LexMode::Expression, TokenKind::Range)? {
                let next = self.lexer.peek(LexMode::Expression)?;
                if next.kind == TokenKind::Number {
                    self.lexer.next_token(LexMode::Expression)?;
                    let high = self.number(&next)?;
                    if low > high {
                        return Err(self.error(
                            &low_token,
                            SyntaxErrorKind::InvalidRange { low, high },
                        ));
                    }
                    Range::new(low, high)
                } else {
                    Range::open(low)
                }
            } else {
                Range::single(low)
            };
            ranges.try_reserve(1)?;
            ranges.push(range);

            if !self.lexer.consume_if(LexMode::Expression, TokenKind::Comma)? {
                break;
            }
        }
        self.finish_relation(Target::Ranges(ranges))?;
        self.continuation()
    }

    fn samples(&mut self, kind: SampleKind) -> Result<Option<ParseState>, PluralError> {
        let marker_position = self.lexer.position().saturating_sub(kind.marker().len());
        let mut raw = String::new();
        let mut ranges: Vec<SampleRange> = Vec::new();
        let mut unbounded = false;
        let mut expect_item = true;

        let terminator = loop {
            let token = self.lexer.next_token(LexMode::Samples)?;
            match token.kind {
                TokenKind::Sample if expect_item && !unbounded => {
                    let low = self.sample(&token, kind)?;
                    let range = if self.lexer.consume_if(LexMode::Samples, TokenKind::Tilde)? {
                        let high_token = self.lexer.next_token(LexMode::Samples)?;
                        if high_token.kind != TokenKind::Sample {
                            return Err(self.unexpected(&high_token, Expected::Sample));
                        }
                        let high = self.sample(&high_token, kind)?;
                        raw.try_reserve(token.text.len() + high_token.text.len() + 1)?;
                        raw.push_str(token.text);
                        raw.push('~');
                        raw.push_str(high_token.text);
                        SampleRange::new(low, high).map_err(|reason| {
                            let text = &self.source[token.position..high_token.end()];
                            self.invalid_sample(&token, text, reason)
                        })?
                    } else {
                        raw.try_reserve(token.text.len())?;
                        raw.push_str(token.text);
                        SampleRange::new(low, low)
                            .map_err(|reason| self.invalid_sample(&token, token.text, reason))?
                    };
                    ranges.try_reserve(1)?;
                    ranges.push(range);
                    expect_item = false;
                }
                TokenKind::Ellipsis if expect_item && !ranges.is_empty() && !unbounded => {
                    raw.try_reserve("…".len())?;
                    raw.push('…');
                    unbounded = true;
                    expect_item = false;
                }
                TokenKind::Comma if !expect_item && !unbounded => {
                    raw.try_reserve(2)?;
                    raw.push_str(", ");
                    expect_item = true;
                }
                TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::IntegerSamples
                | TokenKind::DecimalSamples
                    if !expect_item =>
                {
                    break token;
                }
                _ if expect_item => return Err(self.unexpected(&token, Expected::Sample)),
                _ => return Err(self.unexpected(&token, Expected::SampleSeparator)),
            }
        };

        let samples = Samples::new(raw, ranges, unbounded);
        let source = self.source;
        let rule = self.pending_rule()?;
        let slot = match kind {
            SampleKind::Integer => &mut rule.integer_samples,
            SampleKind::Decimal => &mut rule.decimal_samples,
        };
        if slot.is_some() {
            let kind = SyntaxErrorKind::DuplicateSamples(kind);
            return Err(SyntaxError::at(source, marker_position, kind).into());
        }
        *slot = Some(samples);

        match terminator.kind {
            TokenKind::IntegerSamples => Ok(Some(ParseState::Samples(SampleKind::Integer))),
            TokenKind::DecimalSamples => Ok(Some(ParseState::Samples(SampleKind::Decimal))),
            _ => {
                self.finish_rule()?;
                Ok(Some(ParseState::Keyword))
            }
        }
    }

    // === Transitions ===

    /// After a complete relation: `and`, `or`, or the end of the condition.
    fn continuation(&mut self) -> Result<ParseState, PluralError> {
        let token = self.lexer.peek(LexMode::Expression)?;
        match token.kind {
            TokenKind::And => {
                self.lexer.next_token(LexMode::Expression)?;
                Ok(ParseState::Expr)
            }
            TokenKind::Or => {
                self.lexer.next_token(LexMode::Expression)?;
                self.close_conjunction()?;
                Ok(ParseState::Expr)
            }
            TokenKind::Semicolon
            | TokenKind::Eof
            | TokenKind::IntegerSamples
            | TokenKind::DecimalSamples => {
                self.close_conjunction()?;
                Ok(self.after_condition()?.unwrap_or(ParseState::Keyword))
            }
            _ => Err(self.unexpected(&token, Expected::Continuation)),
        }
    }

    /// After a condition: a sample list or the end of the rule group.
    fn after_condition(&mut self) -> Result<Option<ParseState>, PluralError> {
        let token = self.lexer.next_token(LexMode::Expression)?;
        match token.kind {
            TokenKind::IntegerSamples => Ok(Some(ParseState::Samples(SampleKind::Integer))),
            TokenKind::DecimalSamples => Ok(Some(ParseState::Samples(SampleKind::Decimal))),
            TokenKind::Semicolon => {
                self.finish_rule()?;
                Ok(Some(ParseState::Keyword))
            }
            TokenKind::Eof => {
                self.finish_rule()?;
                Ok(None)
            }
            _ => Err(self.unexpected(&token, Expected::Continuation)),
        }
    }

    fn finish_relation(&mut self, target: Target) -> Result<(), PluralError> {
        let Some(pending) = self.relation.take() else {
            return Err(self.internal_error());
        };
        let relation = pending.with_target(target);
        let rule = self.pending_rule()?;
        rule.relations.try_reserve(1)?;
        rule.relations.push(relation);
        Ok(())
    }

    fn close_conjunction(&mut self) -> Result<(), PluralError> {
        let rule = self.pending_rule()?;
        let relations = mem::take(&mut rule.relations);
        rule.conjunctions.try_reserve(1)?;
        rule.conjunctions.push(Conjunction { relations });
        Ok(())
    }

    fn finish_rule(&mut self) -> Result<(), PluralError> {
        let Some(pending) = self.rule.take() else {
            return Err(self.internal_error());
        };
        let condition = if pending.keyword.is_other() {
            Disjunction::always()
        } else {
            Disjunction {
                conjunctions: pending.conjunctions,
            }
        };
        let rule = Rule::new(
            pending.keyword,
            condition,
            pending.integer_samples,
            pending.decimal_samples,
        );
        if rule.keyword().is_other() {
            self.other = Some(rule);
        } else {
            self.explicit.try_reserve(1)?;
            self.explicit.push(rule);
        }
        Ok(())
    }

    // === Helpers ===

    fn is_defined(&self, keyword: &Keyword) -> bool {
        if keyword.as_str() == OTHER {
            return self.other.is_some();
        }
        self.explicit.iter().any(|rule| rule.keyword() == keyword)
    }

    fn pending_rule(&mut self) -> Result<&mut PendingRule, PluralError> {
        let position = self.lexer.position();
        let source = self.source;
        self.rule.as_mut().ok_or_else(|| {
            let kind = SyntaxErrorKind::UnexpectedToken {
                expected: Expected::Keyword,
                found: "a condition".to_string(),
            };
            SyntaxError::at(source, position, kind).into()
        })
    }

    fn number(&self, token: &Token<'_>) -> Result<u64, PluralError> {
        token.text.parse().map_err(|_| {
            self.error(
                token,
                SyntaxErrorKind::NumberOutOfRange(token.text.to_string()),
            )
        })
    }

    fn sample(&self, token: &Token<'_>, kind: SampleKind) -> Result<DecimalOperands, PluralError> {
        let value: DecimalOperands = token
            .text
            .parse()
            .map_err(|_| self.invalid_sample(token, token.text, "malformed number"))?;
        if kind == SampleKind::Integer && value.visible_fraction_digit_count() != 0 {
            return Err(self.invalid_sample(
                token,
                token.text,
                "integer samples must not have fraction digits",
            ));
        }
        Ok(value)
    }

    fn invalid_sample(&self, token: &Token<'_>, text: &str, reason: &str) -> PluralError {
        self.error(
            token,
            SyntaxErrorKind::InvalidSample {
                sample: text.to_string(),
                reason: reason.to_string(),
            },
        )
    }

    fn unexpected(&self, token: &Token<'_>, expected: Expected) -> PluralError {
        self.error(
            token,
            SyntaxErrorKind::UnexpectedToken {
                expected,
                found: token.describe(),
            },
        )
    }

    fn error(&self, token: &Token<'_>, kind: SyntaxErrorKind) -> PluralError {
        SyntaxError::at(self.source, token.position, kind).into()
    }

    /// A state reached without the data it needs; unreachable from text.
    fn internal_error(&self) -> PluralError {
        let kind = SyntaxErrorKind::UnexpectedToken {
            expected: Expected::Operand,
            found: "an incomplete relation".to_string(),
        };
        SyntaxError::at(self.source, self.lexer.position(), kind).into()
    }
}
