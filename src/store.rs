use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

pub const STUDENTS: &str = "students";
pub const FEES: &str = "fees";
pub const PAYMENTS: &str = "payments";
pub const USERS: &str = "users";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read collection {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write collection {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("collection {path} holds invalid records: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Flat-file record store: one pretty-printed JSON array per collection.
///
/// Every `load` re-reads the file, so two collections fetched in the same
/// request are independent snapshots. `save` rewrites the whole file in
/// place with no temp-file rename; a crash mid-write can corrupt the
/// collection. Both behaviors are part of the storage contract.
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    /// Opens the data directory, seeding any missing collection file with
    /// its first-run default: empty arrays, plus the single admin user.
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create data directory {}", dir.to_string_lossy()))?;

        let store = DataStore {
            dir: dir.to_path_buf(),
        };
        for name in [STUDENTS, FEES, PAYMENTS] {
            store.seed(name, &json!([]))?;
        }
        store.seed(
            USERS,
            &json!([{ "username": "admin", "password": "admin123", "role": "admin" }]),
        )?;
        Ok(store)
    }

    fn seed(&self, collection: &str, default: &serde_json::Value) -> anyhow::Result<()> {
        let path = self.collection_path(collection);
        if path.exists() {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(default).context("serialize seed records")?;
        std::fs::write(&path, text)
            .with_context(|| format!("failed to seed collection {}", path.to_string_lossy()))?;
        Ok(())
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let path = self.collection_path(collection);
        let text = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| StoreError::Corrupt { path, source })
    }

    pub fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let text = serde_json::to_string_pretty(records).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, text).map_err(|source| StoreError::Write { path, source })
    }
}
