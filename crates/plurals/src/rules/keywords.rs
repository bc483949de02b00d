use std::iter::FusedIterator;

use super::{Keyword, RuleSet};

/// Iterator over the keywords of a [`RuleSet`] in evaluation order.
///
/// `other` always comes last. The cursor can be rewound with
/// [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct Keywords<'a> {
    rules: &'a RuleSet,
    cursor: usize,
}

impl<'a> Keywords<'a> {
    pub(super) fn new(rules: &'a RuleSet) -> Self {
        Keywords { rules, cursor: 0 }
    }

    /// Rewind to the first keyword.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Number of keywords in the rule set, regardless of the cursor.
    pub fn total(&self) -> usize {
        self.rules.keyword_count()
    }
}

impl<'a> Iterator for Keywords<'a> {
    type Item = &'a Keyword;

    fn next(&mut self) -> Option<Self::Item> {
        let rule = self.rules.rule_at(self.cursor)?;
        self.cursor += 1;
        Some(rule.keyword())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Keywords<'_> {}

impl FusedIterator for Keywords<'_> {}
