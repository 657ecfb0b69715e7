use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Display and storage preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    /// Key the snapshot is stored under in the key-value backend.
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    /// Optional custom directory for snapshots. Defaults to `<base>/data`.
    pub data_dir: Option<PathBuf>,
    /// Fallback tracing directive used when `RUST_LOG` is unset.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            storage_key: Self::default_storage_key(),
            data_dir: None,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "₽".into()
    }

    pub fn default_storage_key() -> String {
        "financeData".into()
    }

    pub fn resolve_data_dir(&self, base: &std::path::Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }
}
