//! Form editor: header actions and one input per field

use eframe::egui::{self, Color32, RichText};

use crate::app::{FormFillerApp, UiAction};
use crate::core::field::FormField;
use crate::core::store::FormFieldStore;
use crate::fill::FillSuggestion;
use crate::services::task::TaskSlot;

/// State of the editor view
#[derive(Debug, Default)]
pub struct EditorState {
    /// Document shown in the editor
    pub document_id: Option<String>,
    pub store: FormFieldStore,
    pub load: TaskSlot<Vec<FormField>>,
    pub autofill: TaskSlot<Vec<FillSuggestion>>,
    pub save: TaskSlot<()>,
    /// Whether the preview sheet is shown
    pub show_preview: bool,
}

impl EditorState {
    pub fn is_loading(&self) -> bool {
        self.load.is_busy() || !self.store.is_open()
    }

    /// Cancel pending work and discard the open document
    pub fn reset(&mut self) {
        self.load.cancel();
        self.autofill.cancel();
        self.save.cancel();
        self.store.close();
        self.show_preview = false;
        self.document_id = None;
    }
}

/// Editor header bar
pub struct EditorHeader;

impl EditorHeader {
    pub fn show(ui: &mut egui::Ui, app: &FormFillerApp, actions: &mut Vec<UiAction>) {
        let editor = &app.editor;
        let title = editor
            .store
            .document()
            .map(|doc| doc.display_name.as_str())
            .unwrap_or_default();

        ui.horizontal(|ui| {
            if ui.button("\u{2190} Back").clicked() {
                actions.push(UiAction::BackToDashboard);
            }
            ui.heading(title);

            if editor.is_loading() {
                return;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let saving = editor.save.is_busy();
                let label = if saving { "Saving..." } else { "Save & Complete" };
                if ui.add_enabled(!saving, egui::Button::new(label)).clicked() {
                    actions.push(UiAction::Save);
                }

                let filling = editor.autofill.is_busy();
                let label = if filling { "Filling..." } else { "\u{2728} Auto-fill" };
                let can_fill = !filling && !saving && editor.store.empty_count() > 0;
                if ui
                    .add_enabled(can_fill, egui::Button::new(label))
                    .on_hover_text("Fill empty fields automatically")
                    .clicked()
                {
                    actions.push(UiAction::AutoFill);
                }
                if filling {
                    ui.spinner();
                }

                if ui.button("\u{1F441} Preview").clicked() {
                    actions.push(UiAction::SetPreview(true));
                }
            });
        });
    }
}

/// Field inputs of the open document
pub struct FormEditorPanel;

impl FormEditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &FormFillerApp, actions: &mut Vec<UiAction>) {
        let editor = &app.editor;
        let Some(doc) = editor.store.document().filter(|_| !editor.load.is_busy()) else {
            Self::show_loading(ui);
            return;
        };

        let missing = doc.missing_required().count();
        if missing > 0 {
            ui.weak(format!("{} required field(s) still empty", missing));
            ui.add_space(8.0);
        }

        let locked = editor.autofill.is_busy() || editor.save.is_busy();

        egui::ScrollArea::vertical()
            .id_salt("form_scroll")
            .show(ui, |ui| {
                egui::Frame::group(ui.style()).inner_margin(20.0).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    for field in &doc.fields {
                        Self::show_field(ui, field, locked, actions);
                        ui.add_space(12.0);
                    }
                });
            });
    }

    /// Label, input and validation hint for one field
    fn show_field(ui: &mut egui::Ui, field: &FormField, locked: bool, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&field.label).strong());
            if field.required {
                ui.label(RichText::new("*").color(Color32::from_rgb(239, 68, 68)));
            }
        });

        let mut value = field.value.clone();
        let response = ui.add_enabled(
            !locked,
            egui::TextEdit::singleline(&mut value)
                .id_salt(&field.id)
                .hint_text(field.hint_text())
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            actions.push(UiAction::EditField {
                id: field.id.clone(),
                value,
            });
        }

        if let Some(warning) = field.validation_warning() {
            ui.colored_label(Color32::from_rgb(234, 179, 8), warning);
        }
    }

    /// Spinner shown while the mock load is pending
    fn show_loading(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.add(egui::Spinner::new().size(48.0));
            ui.add_space(12.0);
            ui.weak("Loading form data...");
        });
    }
}
