//! Collaborators of the views: notifications, navigation and mock tasks

pub mod navigation;
pub mod notify;
pub mod task;
