//! Auto-fill provider API

use crate::core::field::FormField;

/// A value proposed for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillSuggestion {
    pub field_id: String,
    pub value: String,
}

impl FillSuggestion {
    pub fn new(field_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            value: value.into(),
        }
    }
}

/// Source of auto-fill values.
///
/// Providers only propose values. Merging them into a document is done by
/// the store, which never overwrites a field that already has a value.
pub trait FillProvider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Propose values for the given fields
    fn suggest(&self, fields: &[FormField]) -> Vec<FillSuggestion>;
}
