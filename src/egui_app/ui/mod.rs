//! egui renderer for the application UI.

mod case_inspector;
mod chrome;
mod new_run_form;
mod plugins_panel;
mod run_detail_panel;
mod runs_panel;
pub mod style;

use std::time::Instant;

use eframe::egui;

use crate::egui_app::controller::{Controller, POLL_INTERVAL, Page};
use crate::settings::ClientSettings;

/// Minimum usable window size.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::Vec2::new(860.0, 520.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: Controller,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app, loading persisted settings and kicking off the
    /// initial fetches.
    pub fn new(settings: ClientSettings) -> Self {
        let mut controller = Controller::new(settings);
        controller.load_initial();
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.controller.tick(Instant::now());

        chrome::render_top_bar(&mut self.controller, ctx);
        chrome::render_status_bar(&self.controller, ctx);
        chrome::render_settings_dialog(&mut self.controller, ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.controller.page().clone() {
                Page::Runs => runs_panel::render(&mut self.controller, ui),
                Page::RunDetail => run_detail_panel::render(&mut self.controller, ui),
                Page::Plugins => plugins_panel::render(&mut self.controller, ui),
            }
        });

        // Keep frames coming on the poll cadence; job results also need a
        // repaint to land without user input.
        if self.controller.wants_poll_repaints() {
            ctx.request_repaint_after(POLL_INTERVAL);
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }
}
