//! Core functionality: form data model, presets, field store, intake and configuration

pub mod catalog;
pub mod config;
pub mod document;
pub mod field;
pub mod intake;
pub mod library;
pub mod store;
