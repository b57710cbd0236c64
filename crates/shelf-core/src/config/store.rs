use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the inventory store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Write-ahead logging (default on)
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// SQLite synchronous mode
    #[serde(default)]
    pub synchronous: SynchronousMode,

    /// Schema version recorded on first open
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// `PRAGMA cache_size`; negative values are KiB
    #[serde(default = "default_cache_size")]
    pub cache_size: i32,

    /// Locator authority the router accepts
    #[serde(default = "default_authority")]
    pub authority: String,

    /// Collection segment the router accepts
    #[serde(default = "default_collection")]
    pub collection: String,
}

/// `PRAGMA synchronous` level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SynchronousMode {
    Full,
    #[default]
    Normal,
    Off,
}

impl SynchronousMode {
    pub fn as_pragma(&self) -> &'static str {
        match self {
            SynchronousMode::Full => "FULL",
            SynchronousMode::Normal => "NORMAL",
            SynchronousMode::Off => "OFF",
        }
    }
}

fn default_wal_mode() -> bool {
    true
}

fn default_schema_version() -> u32 {
    1
}

fn default_cache_size() -> i32 {
    -64000
}

fn default_authority() -> String {
    "com.example.android.inventory".to_string()
}

fn default_collection() -> String {
    "inventory".to_string()
}

impl StoreConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            wal_mode: default_wal_mode(),
            synchronous: SynchronousMode::default(),
            schema_version: default_schema_version(),
            cache_size: default_cache_size(),
            authority: default_authority(),
            collection: default_collection(),
        }
    }

    /// Load a config from a JSON file.
    ///
    /// Only `path` is required; every other field falls back to its default.
    pub fn from_json(file: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(file)?;
        serde_json::from_str(&raw)
            .map_err(|e| ShelfError::Config(format!("{}: {}", file.display(), e)))
    }

    pub fn with_synchronous(mut self, synchronous: SynchronousMode) -> Self {
        self.synchronous = synchronous;
        self
    }

    pub fn with_wal_mode(mut self, wal_mode: bool) -> Self {
        self.wal_mode = wal_mode;
        self
    }

    pub fn with_cache_size(mut self, cache_size: i32) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Route locators under a different authority/collection pair
    pub fn with_routes(mut self, authority: impl Into<String>, collection: impl Into<String>) -> Self {
        self.authority = authority.into();
        self.collection = collection.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("shelf.json");
        std::fs::write(&file, r#"{ "path": "/tmp/inventory.db" }"#).unwrap();

        let cfg = StoreConfig::from_json(&file).unwrap();
        assert_eq!(cfg.path, PathBuf::from("/tmp/inventory.db"));
        assert!(cfg.wal_mode);
        assert_eq!(cfg.synchronous, SynchronousMode::Normal);
        assert_eq!(cfg.schema_version, 1);
        assert_eq!(cfg.authority, "com.example.android.inventory");
        assert_eq!(cfg.collection, "inventory");
    }

    #[test]
    fn test_pragma_settings_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("shelf.json");
        std::fs::write(
            &file,
            r#"{ "path": "inventory.db", "synchronous": "Full", "wal_mode": false }"#,
        )
        .unwrap();

        let cfg = StoreConfig::from_json(&file).unwrap();
        assert_eq!(cfg.synchronous.as_pragma(), "FULL");
        assert!(!cfg.wal_mode);
        assert_eq!(cfg.cache_size, -64000);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("shelf.json");
        std::fs::write(&file, "{ not json").unwrap();

        let err = StoreConfig::from_json(&file).unwrap_err();
        assert!(matches!(err, ShelfError::Config(_)));
    }
}
