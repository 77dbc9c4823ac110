//! Shared state types consumed by the egui renderer.

mod detail;
mod plugins;
mod runs;
mod settings;
mod status;

pub use detail::*;
pub use plugins::*;
pub use runs::*;
pub use settings::*;
pub use status::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub status: StatusBarState,
    pub runs: RunsPanelState,
    pub detail: RunDetailViewState,
    pub plugins: PluginsPanelState,
    /// Dialog for the server connection settings.
    pub settings: SettingsDialogState,
}
