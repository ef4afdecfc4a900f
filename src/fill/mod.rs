//! Auto-fill: provider API and the placeholder rule table

pub mod api;
pub mod rules;

pub use api::{FillProvider, FillSuggestion};
pub use rules::RuleTable;
