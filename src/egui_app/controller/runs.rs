//! Run table refresh, polling hand-off, and run creation.

use std::time::Instant;

use crate::api::{ApiError, CreatedRun, RunConfig, RunSummary};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;

use super::{Controller, Page};

impl Controller {
    /// User-visible refresh of the run table.
    pub fn refresh_runs(&mut self) {
        if self.jobs.runs_refresh_in_progress() {
            return;
        }
        self.ui.runs.loading = true;
        self.jobs.begin_list_runs(self.client.clone(), false);
    }

    /// Silent refresh issued by the poller.
    pub(super) fn begin_poll_refresh(&mut self) {
        self.jobs.begin_list_runs(self.client.clone(), true);
    }

    /// Submit the drafted run. The only client-side guard is an empty
    /// selection; unknown plugins are the server's validation call.
    pub fn create_run(&mut self) {
        let Some(plugin_id) = self.form.plugin_id().map(str::to_string) else {
            self.set_status("Select a plugin before creating a run", StatusTone::Error);
            return;
        };
        if plugin_id.is_empty() {
            self.set_status("Select a plugin before creating a run", StatusTone::Error);
            return;
        }
        if self.jobs.create_in_progress {
            return;
        }
        self.ui.runs.form.creating = true;
        let config = RunConfig {
            plugin_id,
            config: self.form.config(),
        };
        self.jobs.begin_create_run(self.client.clone(), config);
    }

    pub(super) fn apply_runs_listed(
        &mut self,
        poll: bool,
        result: Result<Vec<RunSummary>, ApiError>,
    ) {
        self.jobs.runs_refresh_in_progress = false;
        self.ui.runs.loading = false;
        if self.page != Page::Runs {
            // Response for a view that is no longer active.
            return;
        }
        match result {
            Ok(runs) => {
                self.runs = runs;
                self.rebuild_run_rows();
                let was_polling = self.poller.is_polling();
                self.poller.observe(&self.runs, Instant::now());
                self.ui.runs.polling = self.poller.is_polling();
                if self.poller.is_polling() {
                    self.set_status("Watching live runs", StatusTone::Busy);
                } else if was_polling && poll {
                    self.set_status("All runs finished", StatusTone::Info);
                } else if !poll {
                    self.set_status(
                        format!("{} runs loaded", self.runs.len()),
                        StatusTone::Info,
                    );
                }
            }
            Err(err) => {
                if poll {
                    // Transient blip; the next tick retries.
                    self.set_status(format!("Refresh failed: {err}"), StatusTone::Warning);
                } else {
                    self.set_status(format!("Failed to load runs: {err}"), StatusTone::Error);
                }
            }
        }
    }

    pub(super) fn apply_run_created(&mut self, result: Result<CreatedRun, ApiError>) {
        self.jobs.create_in_progress = false;
        self.ui.runs.form.creating = false;
        match result {
            Ok(created) => {
                self.set_status(
                    format!("Run {} created", view_model::short_run_id(&created.run_id)),
                    StatusTone::Info,
                );
                self.open_run(&created.run_id);
            }
            Err(err) => {
                // The form stays open with the draft intact.
                self.set_status(format!("Failed to create run: {err}"), StatusTone::Error);
            }
        }
    }

    pub(super) fn rebuild_run_rows(&mut self) {
        self.ui.runs.rows = self.runs.iter().map(view_model::run_row).collect();
    }
}
