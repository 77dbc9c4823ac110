//! Run table page.

use egui::{Color32, RichText, Ui};

use crate::egui_app::controller::Controller;

use super::style;

pub(super) fn render(controller: &mut Controller, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.heading("Runs");
        if controller.ui.runs.polling {
            ui.label(
                RichText::new("auto-refreshing")
                    .color(style::palette().text_muted)
                    .italics(),
            );
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let form_open = controller.ui.runs.form.open;
            let toggle_label = if form_open { "Cancel" } else { "New Run" };
            if ui.button(toggle_label).clicked() {
                controller.toggle_new_run_form();
            }
            if ui.button("Refresh").clicked() {
                controller.refresh_runs();
            }
        });
    });
    ui.add_space(6.0);

    if controller.ui.runs.form.open {
        super::new_run_form::render(controller, ui);
        ui.add_space(8.0);
    }

    if controller.ui.runs.loading && controller.ui.runs.rows.is_empty() {
        ui.label("Loading…");
        return;
    }
    if controller.ui.runs.rows.is_empty() {
        ui.label(RichText::new("No runs yet").color(style::palette().text_muted));
        return;
    }

    render_table(controller, ui);
}

fn render_table(controller: &mut Controller, ui: &mut Ui) {
    let rows = controller.ui.runs.rows.clone();
    let mut open_run: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("runs_scroll")
        .show(ui, |ui| {
            egui::Grid::new("runs_table")
                .striped(true)
                .num_columns(11)
                .min_col_width(56.0)
                .show(ui, |ui| {
                    for header in [
                        "ID", "Plugin", "Status", "Created", "Cases", "Accuracy", "Coverage",
                        "Error rate", "Mismatches", "Errors", "",
                    ] {
                        ui.label(RichText::new(header).color(style::palette().text_muted));
                    }
                    ui.end_row();

                    for row in &rows {
                        ui.label(RichText::new(&row.short_id).monospace())
                            .on_hover_text(&row.run_id);
                        ui.label(&row.plugin_id);
                        ui.label(
                            RichText::new(row.status.as_str())
                                .color(style::run_status_color(&row.status)),
                        );
                        ui.label(&row.created_at);
                        match row.progress {
                            Some(fraction) => {
                                ui.add(
                                    egui::ProgressBar::new(fraction)
                                        .desired_width(72.0)
                                        .text(row.cases.clone()),
                                );
                            }
                            None => {
                                ui.label(&row.cases);
                            }
                        }
                        ui.label(&row.accuracy);
                        ui.label(&row.coverage);
                        ui.label(&row.error_rate);
                        ui.label(row.mismatches.to_string());
                        ui.label(row.errors.to_string());
                        if ui.button(RichText::new("View").color(Color32::WHITE)).clicked() {
                            open_run = Some(row.run_id.clone());
                        }
                        ui.end_row();
                    }
                });
        });

    if let Some(run_id) = open_run {
        controller.open_run(&run_id);
    }
}
