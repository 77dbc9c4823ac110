//! Read-only view of the plugin registry and sandbox dependency info.

use egui::{RichText, Ui};

use crate::egui_app::controller::Controller;

use super::style;

pub(super) fn render(controller: &mut Controller, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.heading("Plugins");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Refresh").clicked() {
                controller.refresh_plugins();
                controller.refresh_deps();
            }
        });
    });
    ui.add_space(6.0);

    if controller.ui.plugins.loading && controller.ui.plugins.rows.is_empty() {
        ui.label("Loading…");
        return;
    }
    if controller.ui.plugins.rows.is_empty() {
        ui.label(RichText::new("No plugins registered").color(style::palette().text_muted));
    } else {
        render_table(controller, ui);
    }

    ui.add_space(12.0);
    render_deps(controller, ui);
}

fn render_table(controller: &Controller, ui: &mut Ui) {
    egui::ScrollArea::vertical()
        .id_salt("plugins_scroll")
        .show(ui, |ui| {
            egui::Grid::new("plugins_table")
                .striped(true)
                .num_columns(6)
                .min_col_width(72.0)
                .show(ui, |ui| {
                    for header in ["ID", "Name", "Status", "Schema", "Created", "Updated"] {
                        ui.label(RichText::new(header).color(style::palette().text_muted));
                    }
                    ui.end_row();

                    for row in &controller.ui.plugins.rows {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&row.id).monospace().strong());
                            if row.builtin {
                                ui.label(
                                    RichText::new("built-in")
                                        .small()
                                        .color(style::palette().accent),
                                )
                                .on_hover_text("Ships with the server; cannot be changed");
                            }
                        });
                        ui.label(&row.display_name);
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(row.status.as_str())
                                    .color(style::plugin_status_color(&row.status)),
                            );
                            if let Some(error) = &row.error_message {
                                ui.label(
                                    RichText::new(truncate(error, 50))
                                        .small()
                                        .color(style::palette().warning),
                                )
                                .on_hover_text(error);
                            }
                        });
                        ui.label(RichText::new(&row.schema_json).monospace().small());
                        ui.label(&row.created_at);
                        ui.label(&row.updated_at);
                        ui.end_row();
                    }
                });
        });
}

fn render_deps(controller: &Controller, ui: &mut Ui) {
    let Some(deps) = &controller.ui.plugins.deps else {
        return;
    };
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("Plugin sandbox dependencies").strong());
        ui.label(format!("Allowed: {}", deps.allowed));
        ui.label(format!("Built-in: {}", deps.builtin));
        ui.label(RichText::new(&deps.note).color(style::palette().text_muted));
    });
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars).collect();
    shortened.push('…');
    shortened
}
