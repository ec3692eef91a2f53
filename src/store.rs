//! Persistence for the transaction collection.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{FinancasError, Result};
use crate::models::Transaction;

/// Namespace of the persisted collection. The store file is `<STORAGE_KEY>.json`.
pub const STORAGE_KEY: &str = "financas_ai_transactions";

/// Handles reading and overwriting the whole transaction collection.
pub trait TransactionStore {
    /// Read the persisted collection.
    ///
    /// Implementers must not fail: an unusable backing store yields an empty
    /// collection and a warning. The unusable data must not be lost to a later
    /// [`save`](TransactionStore::save).
    fn load(&mut self) -> Vec<Transaction>;

    /// Replace the persisted collection with `transactions`.
    fn save(&mut self, transactions: &[Transaction]) -> Result<()>;
}

/// Collection written on first use.
fn seed() -> Vec<Transaction> {
    Vec::new()
}

/// Stores the collection as a JSON array in a single file.
///
/// A file that cannot be read back is moved aside to
/// `<name>.json.corrupt-<timestamp>` before anything is written over it. If
/// it cannot be moved, the store refuses to save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    locked: bool,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            locked: false,
        }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Like [`TransactionStore::load`], but reports why the file is unusable.
    pub fn try_load(&mut self) -> Result<Vec<Transaction>> {
        if !self.path.exists() {
            let initial = seed();
            self.save(&initial)?;
            tracing::debug!(path = %self.path.display(), "seeded transaction store");
            return Ok(initial);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            FinancasError::StorageUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            FinancasError::StorageUnavailable(format!("{}: {e}", self.path.display()))
        })
    }

    /// First free `<name>.json.corrupt-<timestamp>[-n]` beside the store file.
    fn quarantine_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let base = format!("{}.corrupt-{stamp}", self.path.display());
        let mut candidate = PathBuf::from(&base);
        let mut n = 1;
        while candidate.exists() {
            candidate = PathBuf::from(format!("{base}-{n}"));
            n += 1;
        }
        candidate
    }

    /// Move an unreadable store file out of the way. Locks the store when
    /// that fails so the original is never overwritten.
    fn quarantine(&mut self) -> Option<PathBuf> {
        let target = self.quarantine_path();
        match std::fs::rename(&self.path, &target) {
            Ok(()) => Some(target),
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    "could not move unreadable store aside: {e}; refusing to save"
                );
                self.locked = true;
                None
            }
        }
    }
}

impl TransactionStore for JsonFileStore {
    fn load(&mut self) -> Vec<Transaction> {
        match self.try_load() {
            Ok(transactions) => transactions,
            Err(e) => {
                if let Some(moved) = self.quarantine() {
                    tracing::warn!(
                        "{e}; moved to {}; continuing with an empty collection",
                        moved.display()
                    );
                } else {
                    tracing::warn!("{e}; continuing with an empty collection");
                }
                Vec::new()
            }
        }
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        if self.locked {
            return Err(FinancasError::StorageUnavailable(format!(
                "{} could not be read or moved aside; fix or remove it first",
                self.path.display()
            )));
        }
        let storage_err = |e: std::io::Error| {
            FinancasError::StorageUnavailable(format!("{}: {e}", self.path.display()))
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage_err)?;
            }
        }
        let json = serde_json::to_string(transactions)?;

        // Write beside the target and rename so readers never see half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(storage_err)?;
        std::fs::rename(&tmp, &self.path).map_err(storage_err)?;
        tracing::debug!(
            count = transactions.len(),
            path = %self.path.display(),
            "saved transactions"
        );
        Ok(())
    }
}
