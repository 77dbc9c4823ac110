//! Persisted client settings.
//!
//! Settings live as TOML under the `.casebench` root. The server URL can be
//! overridden per-process with `CASEBENCH_SERVER_URL`, which wins over the
//! file without being written back to it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the client settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable overriding the configured server URL.
pub const SERVER_URL_ENV: &str = "CASEBENCH_SERVER_URL";

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

/// Client settings persisted between launches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the run service.
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No suitable config directory available: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Resolve the settings file path inside the app root.
pub fn config_path() -> Result<PathBuf, SettingsError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from disk, returning defaults when the file is missing,
/// then apply the environment override.
pub fn load_or_default() -> Result<ClientSettings, SettingsError> {
    let mut settings = load_from_path(&config_path()?)?;
    apply_env_override(&mut settings, std::env::var(SERVER_URL_ENV).ok());
    Ok(settings)
}

/// Persist settings, overwriting any previous contents.
pub fn save(settings: &ClientSettings) -> Result<(), SettingsError> {
    save_to_path(settings, &config_path()?)
}

/// Load settings from a specific path; a missing file yields defaults.
pub fn load_from_path(path: &Path) -> Result<ClientSettings, SettingsError> {
    if !path.exists() {
        return Ok(ClientSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &ClientSettings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(settings)?;
    std::fs::write(path, text).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env_override(settings: &mut ClientSettings, value: Option<String>) {
    if let Some(url) = value {
        let trimmed = url.trim();
        if !trimmed.is_empty() {
            settings.server_url = trimmed.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.server_url, "http://localhost:8000");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let settings = ClientSettings {
            server_url: "http://runs.example.net:9000".to_string(),
        };
        save_to_path(&settings, &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), settings);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server_url = [nope").unwrap();
        assert!(matches!(
            load_from_path(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn env_override_wins_when_non_empty() {
        let mut settings = ClientSettings::default();
        apply_env_override(&mut settings, Some("http://other:1234".to_string()));
        assert_eq!(settings.server_url, "http://other:1234");

        apply_env_override(&mut settings, Some("   ".to_string()));
        assert_eq!(settings.server_url, "http://other:1234");

        apply_env_override(&mut settings, None);
        assert_eq!(settings.server_url, "http://other:1234");
    }
}
