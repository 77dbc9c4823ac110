//! Maintains app state and bridges the run service to the egui UI.

mod background_jobs;
mod detail;
mod form;
mod jobs;
mod plugins;
mod polling;
mod runs;
#[cfg(test)]
mod test_support;

pub use polling::POLL_INTERVAL;

use std::time::Instant;

use crate::api::{ApiClient, RunDetail, RunSummary};
use crate::config_form::ConfigForm;
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::registry::PluginRegistry;
use crate::settings::{self, ClientSettings};

use jobs::ControllerJobs;
use polling::RunPoller;

/// Which page the main panel is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Runs,
    RunDetail,
    Plugins,
}

/// Owns all model state; the renderer reads `ui` and calls methods.
pub struct Controller {
    pub ui: UiState,
    page: Page,
    client: ApiClient,
    settings: ClientSettings,
    registry: PluginRegistry,
    form: ConfigForm,
    runs: Vec<RunSummary>,
    detail_run_id: Option<String>,
    details: Vec<RunDetail>,
    poller: RunPoller,
    jobs: ControllerJobs,
}

impl Controller {
    pub fn new(settings: ClientSettings) -> Self {
        let client = ApiClient::new(settings.server_url.clone());
        Self {
            ui: UiState::default(),
            page: Page::Runs,
            client,
            settings,
            registry: PluginRegistry::default(),
            form: ConfigForm::default(),
            runs: Vec::new(),
            detail_run_id: None,
            details: Vec::new(),
            poller: RunPoller::default(),
            jobs: ControllerJobs::new(),
        }
    }

    /// Kick off the fetches the initial page needs.
    pub fn load_initial(&mut self) {
        self.refresh_runs();
        self.refresh_plugins();
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Drive time-based work; called once per frame.
    pub fn tick(&mut self, now: Instant) {
        if self.poller.due(now) {
            // Reschedule first so a slow refresh skips ticks instead of
            // queueing them.
            self.poller.defer(now);
            if !self.jobs.runs_refresh_in_progress() {
                self.begin_poll_refresh();
            }
        }
    }

    /// Whether the UI should keep repainting on the poll cadence.
    pub fn wants_poll_repaints(&self) -> bool {
        self.poller.is_polling()
    }

    /// Navigate to the run table.
    pub fn show_runs(&mut self) {
        if self.page == Page::Runs {
            return;
        }
        self.leave_current_page();
        self.page = Page::Runs;
        self.refresh_runs();
    }

    /// Navigate to the plugin registry view.
    pub fn show_plugins(&mut self) {
        if self.page == Page::Plugins {
            return;
        }
        self.leave_current_page();
        self.page = Page::Plugins;
        self.refresh_plugins();
        self.refresh_deps();
    }

    /// Tear down whatever the current page holds; every navigation path
    /// releases the poll timer and drops transient drafts.
    fn leave_current_page(&mut self) {
        self.poller.stop();
        self.ui.runs.polling = false;
        self.ui.runs.form.reset();
        self.form.reset();
        self.ui.detail.reset();
        self.detail_run_id = None;
        self.details.clear();
    }

    /// Open the settings dialog seeded with the active server URL.
    pub fn open_settings(&mut self) {
        self.ui.settings.open = true;
        self.ui.settings.server_url = self.settings.server_url.clone();
        self.ui.settings.error = None;
    }

    pub fn close_settings(&mut self) {
        self.ui.settings.open = false;
        self.ui.settings.error = None;
    }

    /// Validate and persist the edited server URL, rebuilding the client.
    pub fn save_settings(&mut self) {
        let draft = self.ui.settings.server_url.trim().to_string();
        if let Err(err) = url::Url::parse(&draft) {
            self.ui.settings.error = Some(format!("Invalid URL: {err}"));
            return;
        }
        self.settings.server_url = draft.clone();
        self.client = ApiClient::new(draft);
        if let Err(err) = settings::save(&self.settings) {
            self.set_status(format!("Could not save settings: {err}"), StatusTone::Warning);
        } else {
            self.set_status(
                format!("Server set to {}", self.settings.server_url),
                StatusTone::Info,
            );
        }
        self.close_settings();
        self.load_initial();
    }

    pub(super) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = style::status_badge_label(tone).to_string();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }
}
