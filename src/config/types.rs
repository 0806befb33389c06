use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where items are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file. Defaults to the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Keep items in process memory only; nothing survives exit.
    #[serde(default)]
    pub in_memory: bool,
}

impl StorageConfig {
    /// Database file to open: the configured path, or
    /// `<data_dir>/itemkeeper/items.sqlite3`.
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}

fn default_database_path() -> PathBuf {
    let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data_dir.join("itemkeeper").join("items.sqlite3")
}
