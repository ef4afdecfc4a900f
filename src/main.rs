//! FormFiller - PDF form filling with simulated AI auto-fill
//!
//! A desktop app to upload PDF forms, edit their fields, fill empty fields
//! automatically and preview the result.

mod app;
mod core;
mod fill;
mod services;
mod ui;

use app::FormFillerApp;
use crate::core::config::AppConfig;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting FormFiller...");

    let ui_config = AppConfig::load().map(|c| c.ui).unwrap_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([ui_config.window_width, ui_config.window_height])
            .with_min_inner_size([720.0, 520.0])
            .with_title("FormFiller AI"),
        ..Default::default()
    };

    eframe::run_native(
        "FormFiller",
        native_options,
        Box::new(|cc| Ok(Box::new(FormFillerApp::new(cc)?))),
    )
}
