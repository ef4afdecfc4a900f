//! Dashboard listing the user's forms

use eframe::egui::{self, Color32, RichText};

use crate::app::{FormFillerApp, UiAction};
use crate::core::document::{DocumentEntry, DocumentStatus};

const CARD_WIDTH: f32 = 250.0;

/// Grid of document cards
pub struct DashboardPanel;

impl DashboardPanel {
    /// Show the dashboard
    pub fn show(ui: &mut egui::Ui, app: &FormFillerApp, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Your Forms");
                ui.weak("Upload and manage your PDF forms for AI-powered filling");
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("+ Upload New Form").clicked() {
                    actions.push(UiAction::OpenUploadModal);
                }
            });
        });

        ui.add_space(16.0);

        if app.library.is_empty() {
            Self::show_empty(ui, actions);
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("dashboard_scroll")
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
                    for entry in app.library.entries() {
                        let _ = Self::show_card(ui, entry, actions);
                    }
                });
            });
    }

    /// Show a single document card; its "Open" button is the only click target
    fn show_card(ui: &mut egui::Ui, entry: &DocumentEntry, actions: &mut Vec<UiAction>) -> egui::Response {
        let color = status_color(entry.status);

        let open = egui::Frame::group(ui.style())
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&entry.display_name).strong().size(16.0));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                            ui.painter().circle_filled(rect.center(), 4.0, color);
                        });
                    });
                    ui.weak(entry.created_label());

                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("\u{1F4C4}").size(48.0));
                    });
                    ui.add_space(8.0);

                    ui.horizontal(|ui| {
                        ui.label("Status:");
                        ui.colored_label(color, entry.status.label());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.button("Open").on_hover_cursor(egui::CursorIcon::PointingHand)
                        })
                        .inner
                    })
                    .inner
                })
                .inner
            })
            .inner;

        if open.clicked() {
            actions.push(UiAction::OpenDocument(entry.id.clone()));
        }
        open
    }

    /// Show the empty state
    fn show_empty(ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        egui::Frame::group(ui.style()).inner_margin(32.0).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("\u{1F4E4}").size(40.0));
                ui.heading("No forms yet");
                ui.label("Upload your first form to get started. Our AI will help you fill it automatically.");
                ui.add_space(10.0);
                if ui.button("+ Upload a Form").clicked() {
                    actions.push(UiAction::OpenUploadModal);
                }
            });
        });
    }
}

/// Indicator color for a status
pub fn status_color(status: DocumentStatus) -> Color32 {
    match status {
        DocumentStatus::Completed => Color32::from_rgb(34, 197, 94),
        DocumentStatus::InProgress => Color32::from_rgb(234, 179, 8),
        DocumentStatus::NotStarted => Color32::from_rgb(107, 114, 128),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn frame(
        ctx: &egui::Context,
        events: Vec<egui::Event>,
        entry: &DocumentEntry,
        actions: &mut Vec<UiAction>,
    ) -> egui::Rect {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut rect = egui::Rect::NOTHING;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                rect = DashboardPanel::show_card(ui, entry, actions).rect;
            });
        });
        rect
    }

    fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    #[test]
    fn test_open_click_pushes_one_action() {
        let ctx = egui::Context::default();
        let entry = DocumentEntry::new("2", "Visa Application", Local::now());
        let mut actions = Vec::new();

        let rect = frame(&ctx, Vec::new(), &entry, &mut actions);
        let pos = rect.center();
        frame(&ctx, vec![egui::Event::PointerMoved(pos)], &entry, &mut actions);
        frame(&ctx, vec![press(pos, true)], &entry, &mut actions);
        frame(&ctx, vec![press(pos, false)], &entry, &mut actions);
        frame(&ctx, Vec::new(), &entry, &mut actions);

        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], UiAction::OpenDocument(id) if id == "2"));
    }

    #[test]
    fn test_card_body_click_does_nothing() {
        let ctx = egui::Context::default();
        let entry = DocumentEntry::new("1", "KYC Form", Local::now());
        let mut actions = Vec::new();

        let rect = frame(&ctx, Vec::new(), &entry, &mut actions);
        // well above the button, inside the card header
        let pos = rect.center() - egui::vec2(CARD_WIDTH / 2.0, 60.0);
        frame(&ctx, vec![egui::Event::PointerMoved(pos)], &entry, &mut actions);
        frame(&ctx, vec![press(pos, true)], &entry, &mut actions);
        frame(&ctx, vec![press(pos, false)], &entry, &mut actions);

        assert!(actions.is_empty());
    }
}
