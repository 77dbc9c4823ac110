//! New-run form wiring: plugin selection, field edits, JSON import/export.

use serde_json::Value;

use crate::egui_app::view_model;

use super::Controller;

impl Controller {
    /// Open or close the new-run form; opening seeds the default selection.
    pub fn toggle_new_run_form(&mut self) {
        let open = !self.ui.runs.form.open;
        self.ui.runs.form.reset();
        self.ui.runs.form.open = open;
        self.form.reset();
        if open {
            self.ensure_default_plugin_selection();
        }
    }

    /// Switch the form to another plugin, dropping the previous draft.
    pub fn select_plugin(&mut self, plugin_id: &str) {
        let schema = self.registry.schema_for(plugin_id);
        self.form.select_plugin(plugin_id, &schema);
        self.rebuild_form_buffers();
    }

    pub fn selected_plugin_id(&self) -> Option<&str> {
        self.form.plugin_id()
    }

    /// Plugins offered by the picker, in registry order.
    pub fn plugin_options(&self) -> &[crate::api::Plugin] {
        self.registry.plugins()
    }

    /// Schema of the active selection, in declaration order.
    pub fn form_schema(&self) -> Vec<(String, crate::config_form::PrimitiveType)> {
        self.form
            .schema()
            .iter()
            .map(|(key, ty)| (key.clone(), *ty))
            .collect()
    }

    /// Coerce the current text buffer for `key` into the model.
    pub fn commit_field_buffer(&mut self, key: &str) {
        let text = self
            .ui
            .runs
            .form
            .buffers
            .get(key)
            .cloned()
            .unwrap_or_default();
        self.form.set_value(key, Value::String(text));
    }

    /// Record a checkbox toggle for a boolean field.
    pub fn set_bool_field(&mut self, key: &str, value: bool) {
        self.form.set_value(key, Value::Bool(value));
    }

    /// Current checkbox state for a boolean field; unset reads unchecked.
    pub fn bool_field(&self, key: &str) -> bool {
        self.form.value(key) == &Value::Bool(true)
    }

    pub fn open_import_dialog(&mut self) {
        self.ui.runs.form.import_open = true;
        self.ui.runs.form.import_text.clear();
        self.ui.runs.form.import_error = None;
    }

    pub fn close_import_dialog(&mut self) {
        self.ui.runs.form.import_open = false;
        self.ui.runs.form.import_error = None;
    }

    /// Merge the pasted JSON into the draft. Failures leave the draft
    /// untouched and keep the dialog open with the error.
    pub fn apply_import(&mut self) {
        let text = self.ui.runs.form.import_text.clone();
        match self.form.import_json(&text) {
            Ok(()) => {
                self.close_import_dialog();
                self.rebuild_form_buffers();
            }
            Err(err) => {
                self.ui.runs.form.import_error = Some(err.to_string());
            }
        }
    }

    /// Open the export dialog with a faithful echo of the draft.
    pub fn open_export_dialog(&mut self) {
        self.ui.runs.form.export_open = true;
        self.ui.runs.form.export_text = self.form.export_json();
    }

    pub fn close_export_dialog(&mut self) {
        self.ui.runs.form.export_open = false;
    }

    /// Default to the first registry plugin, mirroring the run service's
    /// listing order.
    pub(super) fn ensure_default_plugin_selection(&mut self) {
        if self.form.plugin_id().is_some() {
            return;
        }
        if let Some(first) = self.registry.first() {
            let id = first.id.clone();
            self.select_plugin(&id);
        }
    }

    /// Re-derive the text buffers from the model (plugin change, import).
    pub(super) fn rebuild_form_buffers(&mut self) {
        self.ui.runs.form.buffers = self
            .form
            .schema()
            .keys()
            .map(|key| (key.clone(), view_model::buffer_text(self.form.value(key))))
            .collect();
    }
}
