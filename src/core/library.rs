//! Documents listed on the dashboard

use chrono::{DateTime, Local};
use uuid::Uuid;

use super::catalog;
use super::document::{DocumentEntry, DocumentStatus};

/// Dashboard listing, newest uploads first
#[derive(Debug, Default)]
pub struct DocumentLibrary {
    entries: Vec<DocumentEntry>,
}

impl DocumentLibrary {
    /// Library with the built-in sample forms
    pub fn seeded(now: DateTime<Local>) -> Self {
        Self {
            entries: catalog::seed_entries(now),
        }
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DocumentEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Add an uploaded file at the top of the listing
    pub fn add_upload(&mut self, file_name: &str, now: DateTime<Local>) -> &DocumentEntry {
        let id = Self::new_id();
        tracing::info!("Added upload {} as document {}", file_name, id);
        self.entries.insert(0, DocumentEntry::new(id, file_name, now));
        &self.entries[0]
    }

    /// Change the status of an entry; returns false for unknown ids
    pub fn set_status(&mut self, id: &str, status: DocumentStatus) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// Short random id, never colliding with the catalog's numeric ids
    fn new_id() -> String {
        let simple = Uuid::new_v4().simple().to_string();
        format!("u{}", &simple[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_library() {
        let library = DocumentLibrary::seeded(Local::now());
        assert_eq!(library.entries().len(), 3);
        assert_eq!(library.get("2").unwrap().display_name, "Visa Application");
        assert!(library.get("4").is_none());
    }

    #[test]
    fn test_upload_goes_first() {
        let mut library = DocumentLibrary::seeded(Local::now());
        let id = library.add_upload("rental-agreement.pdf", Local::now()).id.clone();

        assert_eq!(id.len(), 9);
        let first = &library.entries()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.display_name, "rental-agreement.pdf");
        assert_eq!(first.status, DocumentStatus::NotStarted);
        assert_eq!(library.entries().len(), 4);
    }

    #[test]
    fn test_upload_ids_are_unique() {
        let mut library = DocumentLibrary::default();
        assert!(library.is_empty());
        let a = library.add_upload("a.pdf", Local::now()).id.clone();
        let b = library.add_upload("b.pdf", Local::now()).id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_status() {
        let mut library = DocumentLibrary::seeded(Local::now());
        assert!(library.set_status("3", DocumentStatus::Completed));
        assert_eq!(library.get("3").unwrap().status, DocumentStatus::Completed);
        assert!(!library.set_status("missing", DocumentStatus::Completed));
    }
}
