//! JSON persistence for Kopilka snapshots over a pluggable key-value store.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use kopi_core::{snapshot_warnings, CoreError, LoadReport, SnapshotStorage};
use kopi_domain::FinanceStore;

pub mod kv;
pub mod migrate;

pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use migrate::{upgrade, Upgrade};

/// Key the whole snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "financeData";

/// Stores the complete [`FinanceStore`] as one JSON document under a single key.
pub struct JsonSnapshotStorage<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> JsonSnapshotStorage<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Deletes the stored snapshot, if any.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.backend.remove(&self.key)
    }
}

impl JsonSnapshotStorage<FileKeyValueStore> {
    /// File-backed storage rooted at `dir`.
    pub fn in_dir(dir: PathBuf, key: impl Into<String>) -> Result<Self, CoreError> {
        Ok(Self::with_key(FileKeyValueStore::new(dir)?, key))
    }
}

impl JsonSnapshotStorage<MemoryKeyValueStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryKeyValueStore::new())
    }
}

impl<S: KeyValueStore> SnapshotStorage for JsonSnapshotStorage<S> {
    fn load(&self) -> Result<Option<LoadReport>, CoreError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            debug!(key = %self.key, "no snapshot stored");
            return Ok(None);
        };
        decode_snapshot(&raw).map(Some)
    }

    fn save(&self, store: &FinanceStore) -> Result<(), CoreError> {
        let data = serialize_snapshot(store)?;
        self.backend.set(&self.key, &data)?;
        debug!(
            key = %self.key,
            incomes = store.incomes.len(),
            expenses = store.expense_count(),
            "snapshot saved"
        );
        Ok(())
    }
}

/// Parses, upgrades and validates one snapshot document.
pub fn decode_snapshot(raw: &str) -> Result<LoadReport, CoreError> {
    let value: Value = serde_json::from_str(raw).map_err(|err| CoreError::Serde(err.to_string()))?;
    let Upgrade {
        value,
        from_version,
        migrations,
        mut warnings,
    } = upgrade(value)?;
    let store: FinanceStore =
        serde_json::from_value(value).map_err(|err| CoreError::Serde(err.to_string()))?;

    let anomalies = snapshot_warnings(&store);
    for anomaly in &anomalies {
        warn!(%anomaly, "snapshot anomaly");
    }
    warnings.extend(anomalies);

    Ok(LoadReport {
        store,
        migrations,
        warnings,
        schema_version: from_version,
    })
}

pub fn serialize_snapshot(store: &FinanceStore) -> Result<String, CoreError> {
    serde_json::to_string_pretty(store).map_err(|err| CoreError::Serde(err.to_string()))
}
