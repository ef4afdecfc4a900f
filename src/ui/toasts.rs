//! Toast overlay in the bottom-right corner

use eframe::egui::{self, Color32, RichText};

use crate::app::UiAction;
use crate::services::notify::{Severity, ToastQueue};

pub struct ToastOverlay;

impl ToastOverlay {
    pub fn show(ctx: &egui::Context, toasts: &ToastQueue, actions: &mut Vec<UiAction>) {
        if toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (index, toast) in toasts.iter().enumerate() {
                    let note = &toast.notification;
                    let accent = match note.severity {
                        Severity::Info => ui.visuals().text_color(),
                        Severity::Success => Color32::from_rgb(34, 197, 94),
                        Severity::Destructive => Color32::from_rgb(239, 68, 68),
                    };

                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.0, accent))
                        .show(ui, |ui| {
                            ui.set_width(300.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&note.title).strong().color(accent));
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    if ui.small_button("\u{2715}").clicked() {
                                        actions.push(UiAction::DismissToast(index));
                                    }
                                });
                            });
                            if !note.message.is_empty() {
                                ui.label(&note.message);
                            }
                        });
                    ui.add_space(6.0);
                }
            });
    }
}
