//! Focused view of one case with the annotation form.

use egui::RichText;

use crate::egui_app::controller::Controller;

use super::style;

pub(super) fn render(controller: &mut Controller, ctx: &egui::Context) {
    let Some(inspector) = controller.ui.detail.inspector.clone() else {
        return;
    };
    let mut open = true;
    let mut save = false;
    let mut close = false;

    egui::Window::new(format!("Case {}", inspector.case_id))
        .open(&mut open)
        .collapsible(false)
        .default_width(520.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("case_inspector_scroll")
                .max_height(480.0)
                .show(ui, |ui| {
                    section(ui, "Case data", |ui| {
                        code_block(ui, &inspector.case_data);
                    });

                    section(ui, "Comparison", |ui| {
                        ui.label(format!(
                            "Truth: {}",
                            inspector.truth.as_deref().unwrap_or("-")
                        ));
                        ui.label(format!(
                            "Pred: {}",
                            inspector.pred_value.as_deref().unwrap_or("-")
                        ));
                        if inspector.matched {
                            ui.label(RichText::new("Match: yes").color(style::palette().success));
                        } else {
                            ui.label(RichText::new("Match: no").color(style::palette().warning));
                        }
                        if let Some(reason) = &inspector.mismatch_reason {
                            ui.label(format!("Reason: {reason}"));
                        }
                    });

                    if let Some(raw) = &inspector.raw {
                        section(ui, "Raw response", |ui| {
                            code_block(ui, raw);
                        });
                    }
                    if let Some(meta) = &inspector.meta {
                        section(ui, "Metadata", |ui| {
                            code_block(ui, meta);
                        });
                    }

                    section(ui, "Annotations", |ui| {
                        render_annotation_form(controller, ui, &mut save);
                    });
                });
            ui.separator();
            if ui.button("Close").clicked() {
                close = true;
            }
        });

    if save {
        controller.save_annotation();
    } else if close || !open {
        controller.close_case();
    }
}

fn render_annotation_form(controller: &mut Controller, ui: &mut egui::Ui, save: &mut bool) {
    let Some(draft) = controller.ui.detail.inspector.as_mut() else {
        return;
    };
    ui.label("Comment:");
    ui.add(
        egui::TextEdit::multiline(&mut draft.comment)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    ui.horizontal(|ui| {
        ui.label("Tag:");
        ui.text_edit_singleline(&mut draft.tag);
    });
    ui.checkbox(&mut draft.reviewed, "Reviewed");
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!draft.saving, egui::Button::new("Save"))
            .clicked()
        {
            *save = true;
        }
        if draft.saving {
            ui.spinner();
        }
    });
}

fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.label(RichText::new(title).strong());
    ui.add_space(2.0);
    add_contents(ui);
    ui.add_space(8.0);
}

fn code_block(ui: &mut egui::Ui, text: &str) {
    let mut readonly = text.to_string();
    ui.add(
        egui::TextEdit::multiline(&mut readonly)
            .code_editor()
            .interactive(false)
            .desired_width(f32::INFINITY),
    );
}
