//! CLI command implementations.

mod check;
mod keywords;
mod select;
mod source;

pub use check::{run_check, CheckArgs};
pub use keywords::{run_keywords, KeywordsArgs};
pub use select::{run_select, SelectArgs};
