use crate::governance::Pubkey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to write file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("settings validation failed: {0}")]
    Settings(String),
    #[error("failed to resolve home directory for global config path")]
    HomeDirectoryUnavailable,
}

pub const GLOBAL_STATE_DIR: &str = ".govforge";
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the governance RPC service.
    pub rpc_base: String,
    /// Realm the composed proposals belong to.
    pub realm: Pubkey,
    /// Whether the realm has a council and proposals may be routed to it.
    #[serde(default)]
    pub council_available: bool,
}

pub fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.rpc_base.trim().is_empty() {
        return Err(ConfigError::Settings("rpcBase must be non-empty".to_string()));
    }
    Ok(())
}

pub fn global_state_root() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(Path::new(&home).join(GLOBAL_STATE_DIR))
}

pub fn global_settings_path() -> Result<PathBuf, ConfigError> {
    Ok(global_state_root()?.join(GLOBAL_SETTINGS_FILE_NAME))
}

pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let settings: Settings = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    validate_settings(settings)?;
    let body = serde_yaml::to_string(settings).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, body).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })
}
