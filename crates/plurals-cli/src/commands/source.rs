//! Rule text given inline or read from a file.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{miette, IntoDiagnostic, Report, Result};
use plurals::RuleSet;
use tracing::debug;

use crate::output::RuleDiagnostic;

/// Where a command reads its plural rules from.
#[derive(Debug, Args)]
pub struct RuleSource {
    /// Plural rule text, e.g. "one: i = 1 and v = 0". Takes precedence over --file
    #[arg(long, required_unless_present = "file")]
    pub rules: Option<String>,

    /// File containing plural rule text
    #[arg(long, env = "PLURALS_RULES_FILE")]
    pub file: Option<PathBuf>,
}

impl RuleSource {
    /// Load and parse the rules.
    ///
    /// A parse error is printed as a diagnostic and yields `Ok(None)`, so the
    /// caller can exit with `DATAERR`.
    pub fn load(&self) -> Result<Option<RuleSet>> {
        let (name, content) = match (&self.rules, &self.file) {
            (Some(text), _) => ("<rules>".to_string(), text.clone()),
            (None, Some(path)) => {
                let content = read_to_string(path)
                    .into_diagnostic()
                    .map_err(|e| miette!("Failed to read rule file {:?}: {}", path, e))?;
                (path.display().to_string(), content)
            }
            (None, None) => return Err(miette!("Pass plural rules with --rules or --file")),
        };

        debug!(source = %name, "loading plural rules");
        match RuleSet::parse(&content) {
            Ok(rules) => Ok(Some(rules)),
            Err(e) => {
                let diagnostic = RuleDiagnostic::from_plural_error(&name, &content, &e);
                eprintln!("{:?}", Report::new(diagnostic));
                Ok(None)
            }
        }
    }
}
