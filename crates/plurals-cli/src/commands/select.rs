//! Implementation of the `plurals select` command.

use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use plurals::{DecimalOperands, FormatHints};
use tracing::debug;

use super::source::RuleSource;
use crate::output::table::{format_select_table, Selection};

/// Arguments for the select command.
#[derive(Debug, Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub source: RuleSource,

    /// Numbers to classify, written as decimal literals (1, 1.0, 1.2c6)
    #[arg(required = true, allow_negative_numbers = true)]
    pub numbers: Vec<String>,

    /// Round each number to this many fraction digits
    #[arg(long)]
    pub fraction_digits: Option<u32>,

    /// Exponent of a scientific or compact display of the numbers
    #[arg(long, allow_negative_numbers = true)]
    pub exponent: Option<i32>,

    /// Pad fraction digits with zeros up to this many
    #[arg(long)]
    pub min_fraction_digits: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SelectArgs {
    /// Formatting flags, if any were given.
    ///
    /// With flags the literal is reformatted from its value, so its own
    /// fraction digits and exponent are replaced.
    fn hints(&self) -> Option<FormatHints> {
        let hints = FormatHints::builder()
            .maybe_visible_fraction_digits(self.fraction_digits)
            .maybe_exponent(self.exponent)
            .maybe_min_fraction_digits(self.min_fraction_digits)
            .build();
        let given = self.fraction_digits.is_some()
            || self.exponent.is_some()
            || self.min_fraction_digits.is_some();
        given.then_some(hints)
    }
}

/// Run the select command.
pub fn run_select(args: SelectArgs) -> Result<i32> {
    let Some(rules) = args.source.load()? else {
        return Ok(exitcode::DATAERR);
    };
    let hints = args.hints();

    let mut selections = Vec::with_capacity(args.numbers.len());
    let mut invalid = false;
    for number in &args.numbers {
        let literal = match number.parse::<DecimalOperands>() {
            Ok(literal) => literal,
            Err(e) => {
                eprintln!(
                    "{} {}",
                    "error:".if_supports_color(Stream::Stderr, |t| t.red()),
                    e
                );
                invalid = true;
                continue;
            }
        };
        let operands = match &hints {
            Some(hints) => DecimalOperands::with_hints(literal.signed_value(), hints),
            None => literal,
        };
        let keyword = rules.select(&operands);
        debug!(number = %number, keyword = %keyword, "selected plural keyword");
        selections.push(Selection {
            number: number.clone(),
            keyword: keyword.to_string(),
            operands,
        });
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&selections).into_diagnostic()?
        );
    } else if !selections.is_empty() {
        println!("{}", format_select_table(&selections));
    }

    Ok(if invalid {
        exitcode::DATAERR
    } else {
        exitcode::OK
    })
}
