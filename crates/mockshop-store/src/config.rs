use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::DEFAULT_SCHEMA_VERSION;

/// Where and how collection documents are persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one `<collection>.json` per entity.
    pub data_dir: PathBuf,
    /// Version stamped into new and unversioned documents.
    pub schema_version: String,
    /// `fsync` the temp file (and directory) before and after the rename.
    pub sync_on_write: bool,
    /// Pretty-print documents.
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            sync_on_write: true,
            pretty: true,
        }
    }
}

impl StoreConfig {
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Path of the document backing `collection`.
    pub fn document_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.data_dir, PathBuf::from("data"));
        assert_eq!(c.schema_version, "1.0");
        assert!(c.sync_on_write);
        assert!(c.pretty);
    }

    #[test]
    fn document_path_per_collection() {
        let c = StoreConfig::with_data_dir("/srv/shop");
        assert_eq!(c.document_path("orders"), PathBuf::from("/srv/shop/orders.json"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let c: StoreConfig = serde_json::from_str(r#"{"pretty": false}"#).unwrap();
        assert!(!c.pretty);
        assert_eq!(c.schema_version, "1.0");
    }
}
