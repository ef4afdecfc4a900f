//! Upload dialog with drag-and-drop and file picker

use eframe::egui::{self, Color32, RichText};

use crate::app::{FormFillerApp, UiAction};
use crate::core::intake::{self, SelectedFile};
use crate::services::task::TaskSlot;

/// State of the upload dialog
#[derive(Debug, Default)]
pub struct UploadModalState {
    /// Whether the dialog is shown
    pub open: bool,
    /// File accepted for upload
    pub selected: Option<SelectedFile>,
    /// Pending mock upload, yielding the uploaded file name
    pub upload: TaskSlot<String>,
}

impl UploadModalState {
    pub fn is_uploading(&self) -> bool {
        self.upload.is_busy()
    }

    /// Close the dialog, dropping the selection and any pending upload
    pub fn reset(&mut self) {
        self.upload.cancel();
        self.selected = None;
        self.open = false;
    }
}

/// Upload dialog
pub struct UploadModal;

impl UploadModal {
    /// Show the dialog when open
    pub fn show(ctx: &egui::Context, app: &FormFillerApp, actions: &mut Vec<UiAction>) {
        let state = &app.upload;
        if !state.open {
            return;
        }

        let drag_active = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let max_label = intake::format_size_mb(app.config.intake.max_upload_bytes);

        egui::Window::new("Upload Form")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Upload a PDF form that you want to fill automatically.");
                ui.add_space(8.0);

                let stroke_color = if state.selected.is_some() {
                    Color32::from_rgb(34, 197, 94)
                } else if drag_active {
                    ui.visuals().selection.bg_fill
                } else {
                    Color32::GRAY
                };

                let zone = egui::Frame::group(ui.style())
                    .stroke(egui::Stroke::new(2.0, stroke_color))
                    .inner_margin(24.0)
                    .show(ui, |ui| {
                        ui.set_min_size(egui::vec2(340.0, 140.0));
                        ui.vertical_centered(|ui| match &state.selected {
                            Some(file) => {
                                ui.label(RichText::new("\u{1F4C4}").size(36.0).color(stroke_color));
                                ui.strong(&file.name);
                                ui.weak(file.size_label());
                            }
                            None => {
                                ui.label(RichText::new("\u{2B06}").size(36.0));
                                ui.strong("Drag & drop your PDF here, or click to browse");
                                ui.weak(format!("Supports PDF files up to {}", max_label));
                            }
                        });
                    })
                    .response
                    .interact(egui::Sense::click());

                if !state.is_uploading() && zone.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                    actions.push(UiAction::PickFile);
                }

                if state.selected.is_some() && !state.is_uploading() && ui.small_button("Remove file").clicked() {
                    actions.push(UiAction::ClearSelection);
                }

                ui.add_space(8.0);
                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        actions.push(UiAction::CloseUploadModal);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = if state.is_uploading() { "Uploading..." } else { "Upload" };
                        let enabled = state.selected.is_some() && !state.is_uploading();
                        if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                            actions.push(UiAction::StartUpload);
                        }
                        if state.is_uploading() {
                            ui.spinner();
                        }
                    });
                });
            });
    }
}
