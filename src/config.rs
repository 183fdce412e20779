use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Host-facing configuration. Today this is just where the store lives;
/// the default matches the relative path the desktop shell has always used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub database_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./database.db"),
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file, falling back to defaults when the file
    /// does not exist. A file that exists but fails to parse is an error.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|err| AppError::Io(err.to_string()))?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}
