//! UI components for FormFiller

pub mod dashboard;
pub mod form_editor;
pub mod preview;
pub mod toasts;
pub mod upload_modal;
