//! Implementation of the `plurals keywords` command.

use clap::Args;
use miette::{IntoDiagnostic, Result};
use plurals::{RuleSet, SampleKind};
use serde::Serialize;

use super::source::RuleSource;
use crate::output::table::format_keywords_table;

/// Arguments for the keywords command.
#[derive(Debug, Args)]
pub struct KeywordsArgs {
    #[command(flatten)]
    pub source: RuleSource,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one keyword.
#[derive(Debug, Serialize)]
struct KeywordJson {
    keyword: String,
    condition: String,
    integer_samples: Option<String>,
    decimal_samples: Option<String>,
}

fn keyword_json(rules: &RuleSet) -> Vec<KeywordJson> {
    rules
        .rules()
        .map(|rule| KeywordJson {
            keyword: rule.keyword().to_string(),
            condition: rule.condition().to_string(),
            integer_samples: rule.samples(SampleKind::Integer).map(ToString::to_string),
            decimal_samples: rule.samples(SampleKind::Decimal).map(ToString::to_string),
        })
        .collect()
}

/// Run the keywords command.
pub fn run_keywords(args: KeywordsArgs) -> Result<i32> {
    let Some(rules) = args.source.load()? else {
        return Ok(exitcode::DATAERR);
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&keyword_json(&rules)).into_diagnostic()?
        );
    } else {
        println!("{}", format_keywords_table(&rules));
    }

    Ok(exitcode::OK)
}
