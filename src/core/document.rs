//! Form documents and their dashboard entries

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::field::FormField;

/// Fill status shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl DocumentStatus {
    /// Human-readable label ("not started", "in progress", "completed")
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }
}

/// A document as listed on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEntry {
    pub id: String,
    /// Uploaded file name or preset title
    pub display_name: String,
    pub status: DocumentStatus,
    pub created_at: DateTime<Local>,
}

impl DocumentEntry {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, created_at: DateTime<Local>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            status: DocumentStatus::NotStarted,
            created_at,
        }
    }

    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }

    /// Creation date formatted for the dashboard card
    pub fn created_label(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// A loaded form with its ordered fields
#[derive(Debug, Clone, PartialEq)]
pub struct FormDocument {
    pub id: String,
    pub display_name: String,
    /// Display order is significant
    pub fields: Vec<FormField>,
    pub status: DocumentStatus,
    pub created_at: DateTime<Local>,
}

impl FormDocument {
    /// Build a document from its listing entry and loaded fields
    pub fn from_entry(entry: &DocumentEntry, fields: Vec<FormField>) -> Self {
        Self {
            id: entry.id.clone(),
            display_name: entry.display_name.clone(),
            fields,
            status: entry.status,
            created_at: entry.created_at,
        }
    }

    /// Number of fields with a non-empty value
    pub fn filled_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.is_empty()).count()
    }

    /// Required fields that are still empty
    pub fn missing_required(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().filter(|f| f.required && f.is_empty())
    }
}
