//! Plugin registry refresh and the read-only plugins page.

use crate::api::{ApiError, Plugin, PluginDeps};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;

use super::{Controller, Page};

impl Controller {
    /// Refresh the cached plugin registry.
    pub fn refresh_plugins(&mut self) {
        if self.jobs.plugins_in_progress {
            return;
        }
        self.ui.plugins.loading = true;
        self.jobs.begin_list_plugins(self.client.clone());
    }

    /// Fetch the sandbox dependency allowances for display.
    pub fn refresh_deps(&mut self) {
        self.jobs.begin_fetch_deps(self.client.clone());
    }

    pub(super) fn apply_plugins_listed(&mut self, result: Result<Vec<Plugin>, ApiError>) {
        self.jobs.plugins_in_progress = false;
        self.ui.plugins.loading = false;
        match result {
            Ok(plugins) => {
                self.registry.replace(plugins);
                self.ui.plugins.rows = self
                    .registry
                    .plugins()
                    .iter()
                    .map(view_model::plugin_row)
                    .collect();
                self.reconcile_form_selection();
            }
            Err(err) => {
                self.set_status(format!("Failed to load plugins: {err}"), StatusTone::Error);
            }
        }
    }

    pub(super) fn apply_deps_fetched(&mut self, result: Result<PluginDeps, ApiError>) {
        self.jobs.deps_in_progress = false;
        match result {
            Ok(deps) => {
                self.ui.plugins.deps = Some(view_model::deps_view(&deps));
            }
            Err(err) => {
                // Informational panel only; the registry view stays usable.
                self.set_status(
                    format!("Could not load dependency info: {err}"),
                    StatusTone::Warning,
                );
            }
        }
    }

    /// Keep the form selection valid against the refreshed registry.
    fn reconcile_form_selection(&mut self) {
        if self.page != Page::Runs || !self.ui.runs.form.open {
            return;
        }
        match self.form.plugin_id() {
            Some(id) if self.registry.get(id).is_some() => {}
            _ => {
                self.form.reset();
                self.ensure_default_plugin_selection();
            }
        }
    }
}
