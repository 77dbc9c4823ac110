//! View state for the run table and the new-run form.

use std::collections::BTreeMap;

use crate::api::RunStatus;

/// One row of the run table, pre-formatted for display.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRowView {
    pub run_id: String,
    pub short_id: String,
    pub plugin_id: String,
    pub status: RunStatus,
    pub created_at: String,
    /// Case count column; shows progress counts while the run is live.
    pub cases: String,
    /// Completion fraction when both counts are known for a live run.
    pub progress: Option<f32>,
    pub accuracy: String,
    pub coverage: String,
    pub error_rate: String,
    pub mismatches: i64,
    pub errors: i64,
}

/// State of the schema-driven new-run form.
#[derive(Clone, Debug, Default)]
pub struct NewRunFormState {
    pub open: bool,
    pub creating: bool,
    /// Per-field text buffers so intermediate invalid input stays editable.
    /// Boolean fields render as checkboxes straight off the model.
    pub buffers: BTreeMap<String, String>,
    pub import_open: bool,
    pub import_text: String,
    pub import_error: Option<String>,
    pub export_open: bool,
    pub export_text: String,
}

impl NewRunFormState {
    /// Drop all transient form chrome, keeping nothing across navigation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State backing the runs page.
#[derive(Clone, Debug, Default)]
pub struct RunsPanelState {
    pub rows: Vec<RunRowView>,
    pub loading: bool,
    /// Whether the poller is live; surfaces as an auto-refresh badge.
    pub polling: bool,
    pub form: NewRunFormState,
}
