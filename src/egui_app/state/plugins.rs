//! View state for the read-only plugin registry page.

use crate::api::PluginStatus;

/// One row of the plugin table.
#[derive(Clone, Debug, PartialEq)]
pub struct PluginRowView {
    pub id: String,
    pub display_name: String,
    pub status: PluginStatus,
    pub error_message: Option<String>,
    /// Compact JSON rendering of the declared config schema.
    pub schema_json: String,
    pub created_at: String,
    pub updated_at: String,
    /// The `demo` plugin ships with the server.
    pub builtin: bool,
}

/// Sandbox dependency allowances, pre-joined for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PluginDepsView {
    pub allowed: String,
    pub builtin: String,
    pub note: String,
}

/// State backing the plugins page.
#[derive(Clone, Debug, Default)]
pub struct PluginsPanelState {
    pub loading: bool,
    pub rows: Vec<PluginRowView>,
    pub deps: Option<PluginDepsView>,
}
