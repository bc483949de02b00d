//! Terminal and diagnostic output.

pub mod diagnostic;
pub mod table;

pub use diagnostic::RuleDiagnostic;
