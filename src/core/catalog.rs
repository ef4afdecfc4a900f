//! Built-in form presets and the seeded dashboard entries

use chrono::{DateTime, Duration, Local};

use super::document::{DocumentEntry, DocumentStatus};
use super::field::{FieldKind, FormField};

/// A fixed, hard-coded field set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Kyc,
    VisaApplication,
    TaxDeclaration,
}

impl Preset {
    /// Resolve the preset for a document id; unknown ids get the tax declaration
    pub fn for_document(document_id: &str) -> Self {
        match document_id {
            "1" => Self::Kyc,
            "2" => Self::VisaApplication,
            _ => Self::TaxDeclaration,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Kyc => "KYC Form",
            Self::VisaApplication => "Visa Application",
            Self::TaxDeclaration => "Tax Declaration",
        }
    }

    /// Ordered fields of this preset, with its pre-filled values
    pub fn fields(&self) -> Vec<FormField> {
        use FieldKind::*;

        match self {
            Self::Kyc => vec![
                FormField::new("name", "Full Name", Text).with_value("John Doe").required(),
                FormField::new("dob", "Date of Birth", Date).with_value("1990-01-01").required(),
                FormField::new("email", "Email Address", Email)
                    .with_value("john.doe@example.com")
                    .required(),
                FormField::new("phone", "Phone Number", Text)
                    .with_value("+1 555-123-4567")
                    .required(),
                FormField::new("address", "Home Address", Text)
                    .with_value("123 Main St, Anytown, USA")
                    .required(),
                FormField::new("id_number", "ID Number", Text).with_value("AB123456789").required(),
                FormField::new("nationality", "Nationality", Text)
                    .with_value("United States")
                    .required(),
            ],
            Self::VisaApplication => vec![
                FormField::new("name", "Full Name", Text).required(),
                FormField::new("passport", "Passport Number", Text).required(),
                FormField::new("nationality", "Nationality", Text).required(),
                FormField::new("travel_date", "Travel Date", Date).required(),
                FormField::new("destination", "Destination Country", Text)
                    .with_value("India")
                    .required(),
                FormField::new("stay_duration", "Duration of Stay (days)", Number).required(),
                FormField::new("visit_purpose", "Purpose of Visit", Text).required(),
            ],
            Self::TaxDeclaration => vec![
                FormField::new("name", "Taxpayer Name", Text).required(),
                FormField::new("tax_id", "Tax ID Number", Text).required(),
                FormField::new("financial_year", "Financial Year", Text)
                    .with_value("2024-2025")
                    .required(),
                FormField::new("income", "Annual Income", Number).required(),
                FormField::new("deductions", "Total Deductions", Number).required(),
            ],
        }
    }
}

/// Dashboard entries present on first launch
pub fn seed_entries(now: DateTime<Local>) -> Vec<DocumentEntry> {
    vec![
        DocumentEntry::new("1", Preset::Kyc.title(), now).with_status(DocumentStatus::Completed),
        DocumentEntry::new("2", Preset::VisaApplication.title(), now - Duration::days(1))
            .with_status(DocumentStatus::InProgress),
        DocumentEntry::new("3", Preset::TaxDeclaration.title(), now - Duration::days(2)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_preset_resolution() {
        assert_eq!(Preset::for_document("1"), Preset::Kyc);
        assert_eq!(Preset::for_document("2"), Preset::VisaApplication);
        assert_eq!(Preset::for_document("3"), Preset::TaxDeclaration);
        assert_eq!(Preset::for_document("k3j9x0a1b"), Preset::TaxDeclaration);
    }

    #[test]
    fn test_preset_ids_are_unique() {
        for preset in [Preset::Kyc, Preset::VisaApplication, Preset::TaxDeclaration] {
            let fields = preset.fields();
            let ids: HashSet<_> = fields.iter().map(|f| f.id.as_str()).collect();
            assert_eq!(ids.len(), fields.len(), "{:?}", preset);
            assert!(fields.iter().all(|f| f.required));
        }
    }

    #[test]
    fn test_seed_entries() {
        let now = Local::now();
        let entries = seed_entries(now);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].display_name, "KYC Form");
        assert_eq!(entries[0].status, DocumentStatus::Completed);
        assert_eq!(entries[1].status, DocumentStatus::InProgress);
        assert_eq!(entries[2].status, DocumentStatus::NotStarted);
        assert!(entries[2].created_at < entries[1].created_at);
    }
}
