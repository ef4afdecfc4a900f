//! Read-only preview of the filled form

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::app::{FormFillerApp, UiAction};

const NOT_PROVIDED: &str = "Not provided";

/// Preview sheet
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview sheet
    pub fn show(ui: &mut egui::Ui, app: &FormFillerApp, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.heading("Form Preview");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("\u{2715}").on_hover_text("Close").clicked() {
                    actions.push(UiAction::SetPreview(false));
                }
            });
        });
        ui.separator();

        let Some(doc) = app.editor.store.document() else {
            ui.label("No document loaded");
            return;
        };

        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.heading(&doc.display_name);
            ui.weak("Preview of filled form");
            ui.add_space(8.0);
        });

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .body(|mut body| {
                for field in &doc.fields {
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.weak(&field.label);
                        });
                        row.col(|ui| {
                            ui.strong(display_value(&field.value));
                        });
                    });
                }
            });

        ui.add_space(16.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui.button("\u{2B07} Download PDF").clicked() {
                actions.push(UiAction::DownloadPdf);
            }
        });
    }
}

/// Value as shown in the preview
pub fn display_value(value: &str) -> &str {
    if value.is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}
