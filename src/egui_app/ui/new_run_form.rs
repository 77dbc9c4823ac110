//! Schema-driven form for creating a run.

use egui::{RichText, Ui};

use crate::config_form::PrimitiveType;
use crate::egui_app::controller::Controller;
use crate::egui_app::view_model;

use super::style;

pub(super) fn render(controller: &mut Controller, ui: &mut Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("Create run").strong());
        ui.add_space(4.0);

        render_plugin_picker(controller, ui);
        ui.add_space(6.0);
        render_schema_fields(controller, ui);
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let creating = controller.ui.runs.form.creating;
            if ui
                .add_enabled(!creating, egui::Button::new("Create run"))
                .clicked()
            {
                controller.create_run();
            }
            if creating {
                ui.spinner();
            }
            ui.separator();
            if ui.button("Import JSON…").clicked() {
                controller.open_import_dialog();
            }
            if ui.button("Export JSON…").clicked() {
                controller.open_export_dialog();
            }
        });
    });

    render_import_dialog(controller, ui.ctx());
    render_export_dialog(controller, ui.ctx());
}

fn render_plugin_picker(controller: &mut Controller, ui: &mut Ui) {
    let options: Vec<(String, String)> = controller
        .plugin_options()
        .iter()
        .map(|plugin| (plugin.id.clone(), plugin.display_name.clone()))
        .collect();
    let selected = controller.selected_plugin_id().map(str::to_string);
    let selected_label = selected
        .as_deref()
        .and_then(|id| {
            options
                .iter()
                .find(|(option_id, _)| option_id == id)
                .map(|(id, name)| format!("{name} ({id})"))
        })
        .unwrap_or_else(|| "Select a plugin".to_string());

    let mut picked: Option<String> = None;
    ui.horizontal(|ui| {
        ui.label("Plugin:");
        egui::ComboBox::from_id_salt("plugin_picker")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                for (id, name) in &options {
                    let checked = selected.as_deref() == Some(id.as_str());
                    if ui
                        .selectable_label(checked, format!("{name} ({id})"))
                        .clicked()
                    {
                        picked = Some(id.clone());
                    }
                }
            });
    });
    if let Some(id) = picked {
        controller.select_plugin(&id);
    }
}

fn render_schema_fields(controller: &mut Controller, ui: &mut Ui) {
    let schema = controller.form_schema();
    if schema.is_empty() {
        ui.label(
            RichText::new("This plugin requires no configuration")
                .color(style::palette().text_muted),
        );
        return;
    }

    egui::Grid::new("config_fields")
        .num_columns(2)
        .min_col_width(120.0)
        .show(ui, |ui| {
            for (key, ty) in schema {
                let label = view_model::field_label(&key);
                match ty {
                    PrimitiveType::Bool => {
                        ui.label("");
                        let mut checked = controller.bool_field(&key);
                        if ui.checkbox(&mut checked, label).changed() {
                            controller.set_bool_field(&key, checked);
                        }
                    }
                    PrimitiveType::Int | PrimitiveType::Float | PrimitiveType::Str => {
                        ui.label(format!("{label}:"));
                        let buffer = controller
                            .ui
                            .runs
                            .form
                            .buffers
                            .entry(key.clone())
                            .or_default();
                        let hint = format!("Enter {}", label.to_lowercase());
                        let response = ui.add(
                            egui::TextEdit::singleline(buffer)
                                .hint_text(hint)
                                .desired_width(220.0),
                        );
                        if response.changed() {
                            controller.commit_field_buffer(&key);
                        }
                    }
                }
                ui.end_row();
            }
        });
}

fn render_import_dialog(controller: &mut Controller, ctx: &egui::Context) {
    if !controller.ui.runs.form.import_open {
        return;
    }
    let mut open = true;
    let mut apply = false;
    let mut cancel = false;
    egui::Window::new("Import config JSON")
        .open(&mut open)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label("Paste a JSON object; declared fields are coerced, extras kept as-is.");
            egui::ScrollArea::vertical()
                .id_salt("import_scroll")
                .max_height(240.0)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut controller.ui.runs.form.import_text)
                            .code_editor()
                            .desired_rows(8)
                            .desired_width(f32::INFINITY),
                    );
                });
            if let Some(error) = &controller.ui.runs.form.import_error {
                ui.colored_label(style::palette().warning, error);
            }
            ui.horizontal(|ui| {
                if ui.button("Import").clicked() {
                    apply = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });
    if apply {
        controller.apply_import();
    } else if cancel || !open {
        controller.close_import_dialog();
    }
}

fn render_export_dialog(controller: &mut Controller, ctx: &egui::Context) {
    if !controller.ui.runs.form.export_open {
        return;
    }
    let mut open = true;
    let mut close = false;
    egui::Window::new("Current config JSON")
        .open(&mut open)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("export_scroll")
                .max_height(240.0)
                .show(ui, |ui| {
                    // Read-only echo; editing happens through import.
                    let mut text = controller.ui.runs.form.export_text.clone();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .code_editor()
                            .interactive(false)
                            .desired_rows(8)
                            .desired_width(f32::INFINITY),
                    );
                });
            ui.horizontal(|ui| {
                if ui.button("Copy to clipboard").clicked() {
                    ui.ctx()
                        .copy_text(controller.ui.runs.form.export_text.clone());
                }
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });
    if close || !open {
        controller.close_export_dialog();
    }
}
