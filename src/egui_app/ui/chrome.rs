//! Top navigation bar and bottom status bar.

use egui::{Color32, Frame, RichText};

use crate::egui_app::controller::{Controller, Page};

use super::style;

pub(super) fn render_top_bar(controller: &mut Controller, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_bar")
        .frame(Frame::new().fill(Color32::from_rgb(24, 24, 24)))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Casebench")
                        .color(style::palette().accent)
                        .strong(),
                );
                ui.add_space(12.0);
                ui.separator();

                let on_runs = matches!(controller.page(), Page::Runs | Page::RunDetail);
                if ui
                    .selectable_label(on_runs, RichText::new("Runs").color(Color32::WHITE))
                    .clicked()
                {
                    controller.show_runs();
                }
                let on_plugins = controller.page() == &Page::Plugins;
                if ui
                    .selectable_label(on_plugins, RichText::new("Plugins").color(Color32::WHITE))
                    .clicked()
                {
                    controller.show_plugins();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(RichText::new("Server…").color(Color32::WHITE))
                        .clicked()
                    {
                        controller.open_settings();
                    }
                });
            });
        });
}

pub(super) fn render_status_bar(controller: &Controller, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar")
        .frame(Frame::new().fill(Color32::from_rgb(0, 0, 0)))
        .show(ctx, |ui| {
            let status = &controller.ui.status;
            ui.horizontal(|ui| {
                ui.add_space(8.0);
                ui.painter().circle_filled(
                    ui.cursor().min + egui::vec2(9.0, 11.0),
                    9.0,
                    status.badge_color,
                );
                ui.add_space(8.0);
                ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                ui.separator();
                ui.label(RichText::new(&status.text).color(Color32::WHITE));
            });
        });
}

pub(super) fn render_settings_dialog(controller: &mut Controller, ctx: &egui::Context) {
    if !controller.ui.settings.open {
        return;
    }
    let mut open = true;
    let mut save = false;
    let mut cancel = false;
    egui::Window::new("Server connection")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Run service base URL:");
            ui.text_edit_singleline(&mut controller.ui.settings.server_url);
            if let Some(error) = &controller.ui.settings.error {
                ui.colored_label(style::palette().warning, error);
            }
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });
    if save {
        controller.save_settings();
    } else if cancel || !open {
        controller.close_settings();
    }
}
