//! Implementation of the `plurals check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{miette, IntoDiagnostic, Report, Result};
use owo_colors::{OwoColorize, Stream};
use plurals::{PluralError, RuleSet};
use serde::Serialize;
use tracing::debug;

use crate::output::RuleDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Rule files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also check that every @integer and @decimal sample selects its keyword
    #[arg(long)]
    pub samples: bool,

    /// Maximum number of values expanded from each sample list
    #[arg(long, default_value_t = 1000)]
    pub sample_limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    valid: bool,
    keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sample_mismatches: Vec<String>,
}

impl FileReport {
    fn parsed(path: String, rules: &RuleSet, sample_mismatches: Vec<String>) -> Self {
        FileReport {
            path,
            valid: sample_mismatches.is_empty(),
            keywords: rules.keywords().map(ToString::to_string).collect(),
            error: None,
            sample_mismatches,
        }
    }

    fn failed(path: String, err: &PluralError) -> Self {
        FileReport {
            path,
            valid: false,
            keywords: Vec::new(),
            error: Some(err.to_string()),
            sample_mismatches: Vec::new(),
        }
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read rule file {:?}: {}", path, e))?;
        let name = path.display().to_string();
        debug!(path = %name, "checking plural rules");

        let report = match RuleSet::parse(&content) {
            Ok(rules) => {
                let mismatches = if args.samples {
                    rules.verify_samples(args.sample_limit)
                } else {
                    Vec::new()
                };
                if !args.json {
                    for mismatch in &mismatches {
                        eprintln!(
                            "{} {}: {}",
                            "mismatch:".if_supports_color(Stream::Stderr, |t| t.yellow()),
                            name,
                            mismatch
                        );
                    }
                }
                FileReport::parsed(
                    name,
                    &rules,
                    mismatches.iter().map(ToString::to_string).collect(),
                )
            }
            Err(e) => {
                if !args.json {
                    let diagnostic = RuleDiagnostic::from_plural_error(&name, &content, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                FileReport::failed(name, &e)
            }
        };

        if !args.json && report.valid {
            println!(
                "{} {} ({})",
                "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                report.path,
                report.keywords.join(", ")
            );
        }
        reports.push(report);
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).into_diagnostic()?
        );
    }

    if reports.iter().all(|report| report.valid) {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
