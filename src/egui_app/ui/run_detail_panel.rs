//! Run detail page: metrics header, facet tabs, case table.

use egui::{Color32, RichText, Ui};

use crate::egui_app::controller::Controller;
use crate::egui_app::state::Facet;

use super::style;

pub(super) fn render(controller: &mut Controller, ui: &mut Ui) {
    let mut back = false;
    ui.horizontal(|ui| {
        if ui.button("← Back").clicked() {
            back = true;
            return;
        }
        match &controller.ui.detail.metrics {
            Some(metrics) => {
                ui.heading(format!("Run {}", metrics.short_id));
                ui.label(
                    RichText::new(metrics.status.as_str())
                        .color(style::run_status_color(&metrics.status)),
                );
            }
            None => {
                ui.heading("Run");
            }
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let exporting = controller.ui.detail.exporting;
            if ui
                .add_enabled(!exporting, egui::Button::new("Export CSV"))
                .clicked()
            {
                controller.export_csv();
            }
            if exporting {
                ui.spinner();
            }
            if ui.button("Refresh").clicked() {
                controller.refresh_detail_summary();
            }
        });
    });
    if back {
        controller.show_runs();
        return;
    }
    ui.add_space(6.0);

    render_metrics(controller, ui);
    ui.add_space(8.0);
    render_facet_tabs(controller, ui);
    ui.add_space(6.0);

    if controller.ui.detail.facet == Facet::Summary {
        ui.label(
            RichText::new("Pick a facet to browse per-case outcomes")
                .color(style::palette().text_muted),
        );
        return;
    }
    if controller.ui.detail.loading {
        ui.label("Loading…");
        return;
    }
    render_case_table(controller, ui);
    super::case_inspector::render(controller, ui.ctx());
}

fn render_metrics(controller: &Controller, ui: &mut Ui) {
    let Some(metrics) = controller.ui.detail.metrics.clone() else {
        ui.label("Loading…");
        return;
    };
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            metric(ui, "Accuracy", &metrics.accuracy);
            metric(ui, "Coverage", &metrics.coverage);
            metric(ui, "Error rate", &metrics.error_rate);
            metric(ui, "Total cases", &metrics.total_cases);
            metric(ui, "Mismatches", &metrics.mismatches.to_string());
            metric(ui, "Errors", &metrics.errors.to_string());
        });
        if let Some(fraction) = metrics.progress {
            let text = metrics.progress_text.clone().unwrap_or_default();
            ui.add(egui::ProgressBar::new(fraction).text(text));
        } else if let Some(text) = &metrics.progress_text {
            ui.label(format!("Progress: {text}"));
        }
        ui.label(
            RichText::new(format!(
                "Plugin {} · created {}",
                metrics.plugin_id, metrics.created_at
            ))
            .color(style::palette().text_muted),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).color(style::palette().text_muted));
        ui.label(RichText::new(value).strong());
    });
    ui.separator();
}

fn render_facet_tabs(controller: &mut Controller, ui: &mut Ui) {
    let (mismatches, total, errors) = match &controller.ui.detail.metrics {
        Some(metrics) => (
            metrics.mismatches.to_string(),
            metrics.total_cases.clone(),
            metrics.errors.to_string(),
        ),
        None => ("-".to_string(), "-".to_string(), "-".to_string()),
    };
    let tabs = [
        (Facet::Summary, Facet::Summary.label().to_string()),
        (
            Facet::Mismatches,
            format!("{} ({mismatches})", Facet::Mismatches.label()),
        ),
        (Facet::All, format!("{} ({total})", Facet::All.label())),
        (Facet::Errors, format!("{} ({errors})", Facet::Errors.label())),
    ];
    let current = controller.ui.detail.facet;
    let mut picked: Option<Facet> = None;
    ui.horizontal(|ui| {
        for (facet, label) in tabs {
            if ui.selectable_label(current == facet, label).clicked() {
                picked = Some(facet);
            }
        }
    });
    if let Some(facet) = picked {
        controller.set_facet(facet);
    }
}

fn render_case_table(controller: &mut Controller, ui: &mut Ui) {
    let rows = controller.ui.detail.rows.clone();
    if rows.is_empty() {
        ui.label(RichText::new("No cases in this facet").color(style::palette().text_muted));
        return;
    }
    let mut open_case: Option<String> = None;
    egui::ScrollArea::vertical()
        .id_salt("details_scroll")
        .show(ui, |ui| {
            egui::Grid::new("details_table")
                .striped(true)
                .num_columns(7)
                .min_col_width(56.0)
                .show(ui, |ui| {
                    for header in ["Case", "Truth", "Pred", "Match", "Status", "Reviewed", ""] {
                        ui.label(RichText::new(header).color(style::palette().text_muted));
                    }
                    ui.end_row();

                    for row in &rows {
                        ui.label(RichText::new(&row.case_id).monospace());
                        ui.label(&row.truth);
                        ui.label(&row.pred);
                        if row.matched {
                            ui.label(RichText::new("✓").color(style::palette().success));
                        } else {
                            ui.label(RichText::new("✗").color(style::palette().warning));
                        }
                        ui.label(&row.pred_status);
                        ui.label(if row.reviewed { "✓" } else { "-" });
                        if ui.button(RichText::new("View").color(Color32::WHITE)).clicked() {
                            open_case = Some(row.case_id.clone());
                        }
                        ui.end_row();
                    }
                });
        });
    if let Some(case_id) = open_case {
        controller.open_case(&case_id);
    }
}
