//! Main application state and UI coordination

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use eframe::egui;

use crate::core::catalog::Preset;
use crate::core::config::AppConfig;
use crate::core::document::{DocumentEntry, DocumentStatus};
use crate::core::intake;
use crate::core::library::DocumentLibrary;
use crate::core::store;
use crate::fill::{FillProvider, RuleTable};
use crate::services::navigation::{Navigator, Route};
use crate::services::notify::{Notification, NotificationSink, ToastQueue};
use crate::ui::{
    dashboard::DashboardPanel,
    form_editor::{EditorHeader, EditorState, FormEditorPanel},
    preview::PreviewPanel,
    toasts::ToastOverlay,
    upload_modal::{UploadModal, UploadModalState},
};

/// User intent collected while rendering a frame
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    OpenUploadModal,
    CloseUploadModal,
    PickFile,
    ClearSelection,
    StartUpload,
    OpenDocument(String),
    BackToDashboard,
    EditField { id: String, value: String },
    AutoFill,
    Save,
    SetPreview(bool),
    DownloadPdf,
    DismissToast(usize),
    SetDarkTheme(bool),
}

/// Main application state
pub struct FormFillerApp {
    /// Runtime driving the mock delays
    runtime: tokio::runtime::Runtime,
    /// Used to wake the UI when a task finishes
    ctx: egui::Context,
    /// Application configuration
    pub config: AppConfig,
    /// Dashboard listing
    pub library: DocumentLibrary,
    pub navigator: Navigator,
    pub toasts: ToastQueue,
    /// Upload dialog state
    pub upload: UploadModalState,
    /// Editor view state
    pub editor: EditorState,
    /// Source of auto-fill values
    provider: Arc<dyn FillProvider>,
}

impl FormFillerApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> std::io::Result<Self> {
        // Load config or use defaults
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {:#}", e);
            AppConfig::default()
        });

        Self::apply_theme(&cc.egui_ctx, config.ui.is_dark());
        Self::with_config(cc.egui_ctx.clone(), config)
    }

    /// Create an instance around an existing egui context
    pub fn with_config(ctx: egui::Context, config: AppConfig) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("formfiller-tasks")
            .enable_time()
            .build()?;

        let provider: Arc<dyn FillProvider> = Arc::new(RuleTable::from_config(&config.autofill));
        tracing::info!("Auto-fill provider: {}", provider.name());

        Ok(Self {
            runtime,
            ctx,
            config,
            library: DocumentLibrary::seeded(Local::now()),
            navigator: Navigator::default(),
            toasts: ToastQueue::default(),
            upload: UploadModalState::default(),
            editor: EditorState::default(),
            provider,
        })
    }

    fn apply_theme(ctx: &egui::Context, dark: bool) {
        ctx.set_visuals(if dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
    }

    /// Callback requesting a repaint once a task result is ready
    fn waker(&self) -> impl Fn() + Send + 'static {
        let ctx = self.ctx.clone();
        move || ctx.request_repaint()
    }

    /// Apply one user action
    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::OpenUploadModal => self.upload.open = true,
            UiAction::CloseUploadModal => self.upload.reset(),
            UiAction::PickFile => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .pick_file()
                {
                    self.select_path(&path);
                }
            }
            UiAction::ClearSelection => self.upload.selected = None,
            UiAction::StartUpload => self.start_upload(),
            UiAction::OpenDocument(id) => self.navigator.open_document(id),
            UiAction::BackToDashboard => self.navigator.back_to_listing(),
            UiAction::EditField { id, value } => self.editor.store.update(&id, &value),
            UiAction::AutoFill => self.start_auto_fill(),
            UiAction::Save => self.start_save(),
            UiAction::SetPreview(show) => self.editor.show_preview = show,
            UiAction::DownloadPdf => self.toasts.notify(Notification::success(
                "PDF Generated",
                "Your filled PDF is ready for download.",
            )),
            UiAction::DismissToast(index) => self.toasts.dismiss(index),
            UiAction::SetDarkTheme(dark) => {
                Self::apply_theme(&self.ctx, dark);
                self.config.ui.theme = if dark { "dark" } else { "light" }.to_string();
                if let Err(e) = self.config.save() {
                    tracing::error!("Failed to save config: {:#}", e);
                }
            }
        }
    }

    /// Validate a file picked from disk and select it
    pub fn select_path(&mut self, path: &Path) {
        match intake::from_path(path, self.config.intake.max_upload_bytes) {
            Ok(file) => self.upload.selected = Some(file),
            Err(e) => self.toasts.notify(e.notification()),
        }
    }

    /// Validate the first file dropped onto the upload dialog
    fn select_dropped(&mut self, files: &[egui::DroppedFile]) {
        let Some(file) = files.first() else {
            return;
        };
        if self.upload.is_uploading() {
            return;
        }

        let result = intake::from_dropped(
            &file.name,
            &file.mime,
            file.path.as_deref(),
            file.bytes.as_deref(),
            self.config.intake.max_upload_bytes,
        );
        match result {
            Ok(file) => self.upload.selected = Some(file),
            Err(e) => self.toasts.notify(e.notification()),
        }
    }

    fn start_upload(&mut self) {
        let name = match intake::require_selection(self.upload.selected.as_ref()) {
            Ok(file) => file.name.clone(),
            Err(e) => {
                self.toasts.notify(e.notification());
                return;
            }
        };

        let delay = self.config.delays.upload();
        let waker = self.waker();
        self.upload
            .upload
            .start(self.runtime.handle(), "upload", delay, move || name, waker);
    }

    fn start_load(&mut self, document_id: String) {
        self.editor.reset();
        self.editor.document_id = Some(document_id.clone());

        let delay = self.config.delays.load();
        let waker = self.waker();
        self.editor
            .load
            .start(self.runtime.handle(), "load", delay, move || store::load(&document_id), waker);
    }

    fn start_auto_fill(&mut self) {
        if !self.editor.store.is_open() || self.editor.save.is_busy() {
            return;
        }

        let fields = self.editor.store.fields().to_vec();
        let provider = Arc::clone(&self.provider);
        let delay = self.config.delays.autofill();
        let waker = self.waker();
        self.editor.autofill.start(
            self.runtime.handle(),
            "auto-fill",
            delay,
            move || provider.suggest(&fields),
            waker,
        );
    }

    fn start_save(&mut self) {
        if !self.editor.store.is_open() {
            return;
        }

        let delay = self.config.delays.save();
        let waker = self.waker();
        self.editor
            .save
            .start(self.runtime.handle(), "save", delay, || (), waker);
    }

    /// React to a route change: load the opened document or discard the editor state
    fn handle_transition(&mut self) {
        match self.navigator.take_transition() {
            Some(Route::Form { document_id }) => self.start_load(document_id),
            Some(Route::Dashboard) => self.editor.reset(),
            None => {}
        }
    }

    /// Collect results of finished mock tasks
    pub fn poll_tasks(&mut self) {
        if let Some(name) = self.upload.upload.poll() {
            self.library.add_upload(&name, Local::now());
            self.upload.reset();
            self.toasts.notify(Notification::success(
                "Document Uploaded",
                "Your document has been added to your dashboard.",
            ));
        }

        if let Some(fields) = self.editor.load.poll() {
            if let Some(id) = self.editor.document_id.clone() {
                let entry = self
                    .library
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| DocumentEntry::new(&id, Preset::for_document(&id).title(), Local::now()));
                self.editor.store.open(&entry, fields);
            }
        }

        if let Some(suggestions) = self.editor.autofill.poll() {
            let filled = self.editor.store.apply_suggestions(&suggestions);
            if filled > 0 {
                self.mark_in_progress();
            }
            self.toasts.notify(Notification::success(
                "Auto-fill complete",
                format!("Filled {} empty field(s).", filled),
            ));
        }

        if self.editor.save.poll().is_some() {
            if let Some(id) = self.editor.document_id.clone() {
                self.library.set_status(&id, DocumentStatus::Completed);
            }
            self.toasts.notify(Notification::success(
                "Form Saved",
                "Your form data has been saved successfully.",
            ));
            self.navigator.back_to_listing();
            self.handle_transition();
        }
    }

    fn mark_in_progress(&mut self) {
        let Some(id) = self.editor.document_id.as_deref() else {
            return;
        };
        if self.library.get(id).map(|e| e.status) == Some(DocumentStatus::NotStarted) {
            self.library.set_status(id, DocumentStatus::InProgress);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Upload New Form...").clicked() {
                        actions.push(UiAction::BackToDashboard);
                        actions.push(UiAction::OpenUploadModal);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    let dark = self.config.ui.is_dark();
                    if ui.selectable_label(!dark, "Light Theme").clicked() {
                        actions.push(UiAction::SetDarkTheme(false));
                        ui.close();
                    }
                    if ui.selectable_label(dark, "Dark Theme").clicked() {
                        actions.push(UiAction::SetDarkTheme(true));
                        ui.close();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.strong("FormFiller AI");
                });
            });
        });
    }

    /// Keyboard shortcuts for the current view
    fn handle_shortcuts(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        ctx.input(|i| match self.navigator.current() {
            Route::Dashboard => {
                if i.modifiers.ctrl && i.key_pressed(egui::Key::U) {
                    actions.push(UiAction::OpenUploadModal);
                }
                if i.key_pressed(egui::Key::Escape) && self.upload.open {
                    actions.push(UiAction::CloseUploadModal);
                }
            }
            Route::Form { .. } => {
                if i.modifiers.ctrl && i.key_pressed(egui::Key::S) && !self.editor.is_loading() {
                    actions.push(UiAction::Save);
                }
                if i.key_pressed(egui::Key::Escape) && self.editor.show_preview {
                    actions.push(UiAction::SetPreview(false));
                }
            }
        });
    }
}

impl eframe::App for FormFillerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks();

        if self.upload.open {
            let dropped = ctx.input(|i| i.raw.dropped_files.clone());
            if !dropped.is_empty() {
                self.select_dropped(&dropped);
            }
        }

        let mut actions = Vec::new();
        self.handle_shortcuts(ctx, &mut actions);
        self.render_menu_bar(ctx, &mut actions);

        match self.navigator.current() {
            Route::Dashboard => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    DashboardPanel::show(ui, self, &mut actions);
                });
                UploadModal::show(ctx, self, &mut actions);
            }
            Route::Form { .. } => {
                egui::TopBottomPanel::top("editor_header").show(ctx, |ui| {
                    ui.add_space(4.0);
                    EditorHeader::show(ui, self, &mut actions);
                    ui.add_space(4.0);
                });

                if self.editor.show_preview && !self.editor.is_loading() {
                    egui::SidePanel::right("preview_sheet")
                        .resizable(true)
                        .default_width(480.0)
                        .min_width(320.0)
                        .show(ctx, |ui| {
                            PreviewPanel::show(ui, self, &mut actions);
                        });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    FormEditorPanel::show(ui, self, &mut actions);
                });
            }
        }

        ToastOverlay::show(ctx, &self.toasts, &mut actions);

        for action in actions {
            self.apply(action);
        }
        self.handle_transition();

        let now = Instant::now();
        self.toasts.prune(now);
        if let Some(wait) = self.toasts.next_expiry(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DelayConfig;
    use std::time::Duration;

    fn test_app() -> FormFillerApp {
        let config = AppConfig {
            delays: DelayConfig::instant(),
            ..AppConfig::default()
        };
        FormFillerApp::with_config(egui::Context::default(), config).unwrap()
    }

    /// Poll until `done` holds or five seconds pass
    fn pump(app: &mut FormFillerApp, done: impl Fn(&FormFillerApp) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.poll_tasks();
        }
        assert!(done(app), "timed out waiting for tasks");
    }

    fn open(app: &mut FormFillerApp, id: &str) {
        app.apply(UiAction::OpenDocument(id.to_string()));
        app.handle_transition();
        pump(app, |a| !a.editor.is_loading());
    }

    #[test]
    fn test_open_document_loads_preset() {
        let mut app = test_app();
        open(&mut app, "1");

        let doc = app.editor.store.document().unwrap();
        assert_eq!(doc.display_name, "KYC Form");
        assert_eq!(doc.fields[0].id, "name");
        assert_eq!(doc.fields[0].value, "John Doe");
    }

    #[test]
    fn test_visa_auto_fill_flow() {
        let mut app = test_app();
        open(&mut app, "2");

        app.apply(UiAction::EditField {
            id: "name".to_string(),
            value: "Ravi Kumar".to_string(),
        });
        app.apply(UiAction::AutoFill);
        assert!(app.editor.autofill.is_busy());
        pump(&mut app, |a| !a.editor.autofill.is_busy());

        let store = &app.editor.store;
        assert_eq!(store.empty_count(), 0);
        assert_eq!(store.field("name").unwrap().value, "Ravi Kumar");
        assert_eq!(store.field("destination").unwrap().value, "India");

        let last = app.toasts.iter().last().unwrap();
        assert_eq!(last.notification.message, "Filled 5 empty field(s).");
    }

    #[test]
    fn test_save_marks_completed_and_returns() {
        let mut app = test_app();
        open(&mut app, "3");

        app.apply(UiAction::Save);
        pump(&mut app, |a| a.navigator.current() == &Route::Dashboard);

        assert_eq!(app.library.get("3").unwrap().status, DocumentStatus::Completed);
        assert!(!app.editor.store.is_open());
        assert!(app.toasts.iter().any(|t| t.notification.title == "Form Saved"));
    }

    #[test]
    fn test_leaving_editor_discards_edits() {
        let mut app = test_app();
        open(&mut app, "2");
        app.apply(UiAction::EditField {
            id: "passport".to_string(),
            value: "Z1234567".to_string(),
        });

        app.apply(UiAction::BackToDashboard);
        app.handle_transition();
        assert!(!app.editor.store.is_open());

        open(&mut app, "2");
        assert_eq!(app.editor.store.field("passport").unwrap().value, "");
    }

    #[test]
    fn test_upload_without_selection_notifies() {
        let mut app = test_app();
        app.apply(UiAction::OpenUploadModal);
        app.apply(UiAction::StartUpload);

        assert!(!app.upload.is_uploading());
        let last = app.toasts.iter().last().unwrap();
        assert_eq!(last.notification.title, "No file selected");
        assert_eq!(app.library.entries().len(), 3);
    }

    #[test]
    fn test_upload_adds_document_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Lease Agreement.pdf");
        std::fs::write(&path, b"%PDF-1.7\n").unwrap();

        let mut app = test_app();
        app.apply(UiAction::OpenUploadModal);
        app.select_path(&path);
        assert!(app.upload.selected.is_some());

        app.apply(UiAction::StartUpload);
        pump(&mut app, |a| !a.upload.is_uploading());

        assert!(!app.upload.open);
        let first = &app.library.entries()[0];
        assert_eq!(first.display_name, "Lease Agreement.pdf");
        assert_eq!(first.status, DocumentStatus::NotStarted);

        // uploaded documents load the default preset under their own name
        let id = first.id.clone();
        open(&mut app, &id);
        let doc = app.editor.store.document().unwrap();
        assert_eq!(doc.display_name, "Lease Agreement.pdf");
        assert_eq!(doc.fields, Preset::TaxDeclaration.fields());
    }

    #[test]
    fn test_invalid_pick_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let mut app = test_app();
        app.select_path(&path);
        assert!(app.upload.selected.is_none());
        assert_eq!(app.toasts.iter().last().unwrap().notification.title, "Invalid file type");
    }

    #[test]
    fn test_auto_fill_marks_not_started_in_progress() {
        let mut app = test_app();
        open(&mut app, "3");
        app.apply(UiAction::AutoFill);
        pump(&mut app, |a| !a.editor.autofill.is_busy());
        assert_eq!(app.library.get("3").unwrap().status, DocumentStatus::InProgress);
    }

    #[test]
    fn test_unknown_document_uses_preset_title() {
        let mut app = test_app();
        open(&mut app, "does-not-exist");
        let doc = app.editor.store.document().unwrap();
        assert_eq!(doc.display_name, "Tax Declaration");
    }
}
