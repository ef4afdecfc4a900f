//! Form field definitions and per-kind input checks

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Date,
    Number,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Date => "date",
            Self::Number => "number",
        }
    }

    /// Hint text shown in an empty input of this kind
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Text => "",
            Self::Email => "name@example.com",
            Self::Date => "YYYY-MM-DD",
            Self::Number => "0",
        }
    }

    /// Check a value against this kind.
    ///
    /// Returns a short warning when the value does not look right. Empty
    /// values are always accepted, and nothing here blocks saving.
    pub fn validate(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        match self {
            Self::Text => None,
            Self::Email => match value.split_once('@') {
                Some((local, domain)) if !local.is_empty() && !domain.is_empty() => None,
                _ => Some("Enter a valid email address"),
            },
            Self::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .err()
                .map(|_| "Use the YYYY-MM-DD format"),
            Self::Number => value
                .parse::<f64>()
                .err()
                .map(|_| "Enter a number"),
        }
    }
}

/// One editable input on a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Identifier, unique within a document
    pub id: String,
    /// Caption shown next to the input
    pub label: String,
    pub kind: FieldKind,
    /// Current value; empty means unset
    pub value: String,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl FormField {
    /// Create an empty, optional field
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            value: String::new(),
            required: false,
            placeholder: None,
        }
    }

    /// Pre-populate the value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[allow(dead_code)]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Placeholder text for the editor: explicit placeholder, else the kind hint
    pub fn hint_text(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(self.kind.hint())
    }

    /// Warning for the current value, if any
    pub fn validation_warning(&self) -> Option<&'static str> {
        self.kind.validate(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_valid_for_every_kind() {
        for kind in [FieldKind::Text, FieldKind::Email, FieldKind::Date, FieldKind::Number] {
            assert_eq!(kind.validate(""), None);
            assert_eq!(kind.validate("   "), None);
        }
    }

    #[test]
    fn test_email_validation() {
        assert_eq!(FieldKind::Email.validate("john.doe@example.com"), None);
        assert!(FieldKind::Email.validate("john.doe").is_some());
        assert!(FieldKind::Email.validate("@example.com").is_some());
        assert!(FieldKind::Email.validate("john@").is_some());
    }

    #[test]
    fn test_date_validation() {
        assert_eq!(FieldKind::Date.validate("1990-01-01"), None);
        assert!(FieldKind::Date.validate("01/01/1990").is_some());
        assert!(FieldKind::Date.validate("1990-13-01").is_some());
    }

    #[test]
    fn test_number_validation() {
        assert_eq!(FieldKind::Number.validate("14"), None);
        assert_eq!(FieldKind::Number.validate("75000.50"), None);
        assert!(FieldKind::Number.validate("fourteen").is_some());
    }

    #[test]
    fn test_field_builder() {
        let field = FormField::new("email", "Email Address", FieldKind::Email)
            .with_value("john.doe@example.com")
            .required();
        assert!(field.required);
        assert!(!field.is_empty());
        assert_eq!(field.hint_text(), "name@example.com");
        assert_eq!(field.validation_warning(), None);

        let field = field.with_placeholder("you@company.com");
        assert_eq!(field.hint_text(), "you@company.com");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&FieldKind::Number).unwrap();
        assert_eq!(json, "\"number\"");
    }
}
