//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use plurals::{DecimalOperands, PluralOperand, RuleSet, SampleKind};
use serde::Serialize;

/// The keyword selected for one number.
#[derive(Debug, Serialize)]
pub struct Selection {
    /// The number as given on the command line.
    pub number: String,
    /// Selected plural keyword.
    pub keyword: String,
    /// Operands the rules were evaluated against.
    pub operands: DecimalOperands,
}

/// Operand columns, in CLDR order.
const OPERAND_COLUMNS: [PluralOperand; 7] = [
    PluralOperand::N,
    PluralOperand::I,
    PluralOperand::V,
    PluralOperand::W,
    PluralOperand::F,
    PluralOperand::T,
    PluralOperand::E,
];

/// Format selections as a table of number, keyword and operands.
pub fn format_select_table(selections: &[Selection]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Number".to_string(), "Keyword".to_string()];
    header.extend(OPERAND_COLUMNS.iter().map(ToString::to_string));
    table.set_header(header);

    for selection in selections {
        let mut row = vec![selection.number.clone(), selection.keyword.clone()];
        row.extend(
            OPERAND_COLUMNS
                .iter()
                .map(|&op| selection.operands.operand(op).to_string()),
        );
        table.add_row(row);
    }

    table
}

/// Format the rules of a rule set as a table, in evaluation order.
pub fn format_keywords_table(rules: &RuleSet) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Keyword", "Condition", "@integer", "@decimal"]);

    for rule in rules.rules() {
        let samples = |kind: SampleKind| {
            rule.samples(kind)
                .map(ToString::to_string)
                .unwrap_or_default()
        };
        table.add_row(vec![
            rule.keyword().to_string(),
            rule.condition().to_string(),
            samples(SampleKind::Integer),
            samples(SampleKind::Decimal),
        ]);
    }

    table
}
