use crate::{
    domain::sorting::{SortField, SortOrder},
    error::Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// What to load when the state slot is empty or unreadable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// The built-in demo board
    #[default]
    Demo,
    /// No boards at all
    Empty,
}

/// Ordering applied to the cards of each list in board views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub field: SortField,
    pub order: SortOrder,
}

/// Store configuration, usually read from `kanban.toml`.
///
/// Every field is optional in the file; the defaults reproduce the storage
/// keys the browser build used, so existing snapshots keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub state_key: String,
    pub theme_key: String,
    pub legacy_theme_key: String,
    pub seed: SeedMode,
    pub data_dir: PathBuf,
    pub sort: SortConfig,
}

impl StoreConfig {
    pub const FILE_NAME: &'static str = "kanban.toml";

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads a config file; a missing file yields the defaults
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;
        Self::from_toml_str(&contents)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_key: "trello-clone-state".to_string(),
            theme_key: "themePreference".to_string(),
            legacy_theme_key: "theme".to_string(),
            seed: SeedMode::Demo,
            data_dir: PathBuf::from("."),
            sort: SortConfig::default(),
        }
    }
}
