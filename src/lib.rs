//! Library exports for reuse in integration tests.
/// Client for the run service's HTTP boundary.
pub mod api;
/// Application directory helpers.
pub mod app_dirs;
/// Schema-driven configuration form model.
pub mod config_form;
/// Shared egui UI modules.
pub mod egui_app;
mod http_client;
/// Logging setup.
pub mod logging;
/// Read-only plugin registry cache.
pub mod registry;
/// Persisted client settings.
pub mod settings;
