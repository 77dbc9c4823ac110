//! Entry point for the egui-based Casebench UI.

use casebench::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use casebench::{logging, settings};
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = match settings::load_or_default() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Falling back to default settings: {err}");
            settings::ClientSettings::default()
        }
    };

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::Vec2::new(1180.0, 760.0));

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Casebench",
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(settings)))),
    )?;
    Ok(())
}
