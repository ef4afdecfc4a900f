//! Field state of the document open in the editor
//!
//! The free functions are pure transformations over an ordered field
//! sequence. [`FormFieldStore`] owns the current document and replaces its
//! field vector wholesale on every change.

use std::collections::HashMap;

use super::catalog::Preset;
use super::document::{DocumentEntry, FormDocument};
use super::field::FormField;
use crate::fill::{FillProvider, FillSuggestion, RuleTable};

/// Field set for a document id; unknown ids get the default preset
pub fn load(document_id: &str) -> Vec<FormField> {
    let preset = Preset::for_document(document_id);
    tracing::debug!("Loading preset {:?} for document {}", preset, document_id);
    preset.fields()
}

/// Copy of `fields` with the value of field `id` replaced.
///
/// An unknown id returns the fields unchanged.
pub fn update_field(fields: &[FormField], id: &str, value: &str) -> Vec<FormField> {
    fields
        .iter()
        .map(|field| {
            if field.id == id {
                FormField {
                    value: value.to_string(),
                    ..field.clone()
                }
            } else {
                field.clone()
            }
        })
        .collect()
}

/// Fill empty fields from the built-in placeholder rules.
///
/// Synchronous form of the editor's auto-fill: the app runs
/// [`FillProvider::suggest`] on a delayed task and merges the result with
/// [`FormFieldStore::apply_suggestions`], which yields the same fields.
#[allow(dead_code)]
pub fn auto_fill(fields: &[FormField]) -> Vec<FormField> {
    auto_fill_with(fields, &RuleTable::builtin())
}

/// Fill empty fields with the values proposed by `provider`, in one step
#[allow(dead_code)]
pub fn auto_fill_with(fields: &[FormField], provider: &dyn FillProvider) -> Vec<FormField> {
    let suggestions = provider.suggest(fields);
    merge_suggestions(fields, &suggestions)
}

/// Merge suggestions into empty fields only.
///
/// Fields that already hold a value are never touched, and empty
/// suggestions are ignored. Order and identifiers are preserved.
pub fn merge_suggestions(fields: &[FormField], suggestions: &[FillSuggestion]) -> Vec<FormField> {
    let by_id: HashMap<&str, &str> = suggestions
        .iter()
        .filter(|s| !s.value.is_empty())
        .map(|s| (s.field_id.as_str(), s.value.as_str()))
        .collect();

    fields
        .iter()
        .map(|field| match by_id.get(field.id.as_str()) {
            Some(value) if field.is_empty() => FormField {
                value: value.to_string(),
                ..field.clone()
            },
            _ => field.clone(),
        })
        .collect()
}

/// Owns the document open in the editor
#[derive(Debug, Default)]
pub struct FormFieldStore {
    document: Option<FormDocument>,
}

impl FormFieldStore {
    /// Replace the current document with `entry` and its loaded fields
    pub fn open(&mut self, entry: &DocumentEntry, fields: Vec<FormField>) {
        tracing::info!("Opened {} ({} fields)", entry.display_name, fields.len());
        self.document = Some(FormDocument::from_entry(entry, fields));
    }

    /// Discard the current document
    pub fn close(&mut self) {
        if let Some(doc) = self.document.take() {
            tracing::debug!("Discarded unsaved state of {}", doc.display_name);
        }
    }

    pub fn document(&self) -> Option<&FormDocument> {
        self.document.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    pub fn fields(&self) -> &[FormField] {
        self.document
            .as_ref()
            .map(|doc| doc.fields.as_slice())
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields().iter().find(|f| f.id == id)
    }

    /// Set the value of one field
    pub fn update(&mut self, id: &str, value: &str) {
        if let Some(doc) = self.document.as_mut() {
            tracing::debug!("Updating field {}", id);
            doc.fields = update_field(&doc.fields, id, value);
        }
    }

    /// Merge suggestions into the current fields; returns how many were filled
    pub fn apply_suggestions(&mut self, suggestions: &[FillSuggestion]) -> usize {
        let Some(doc) = self.document.as_mut() else {
            return 0;
        };

        let before = doc.filled_count();
        doc.fields = merge_suggestions(&doc.fields, suggestions);
        let filled = doc.filled_count() - before;
        tracing::info!("Auto-fill filled {} field(s) of {}", filled, doc.display_name);
        filled
    }

    /// Number of fields still empty
    pub fn empty_count(&self) -> usize {
        self.fields().iter().filter(|f| f.is_empty()).count()
    }
}
