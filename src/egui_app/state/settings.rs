//! Dialog state for editing the server connection.

/// Settings dialog: edits the run service base URL.
#[derive(Clone, Debug, Default)]
pub struct SettingsDialogState {
    pub open: bool,
    /// URL draft being edited; only validated input reaches disk.
    pub server_url: String,
    pub error: Option<String>,
}
