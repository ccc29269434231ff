//! Measurement history persisted as one JSON array under a single key.
//!
//! Writes are read-modify-write of the whole collection and are not atomic
//! across concurrent writers; a single user in a single view is assumed.

use chrono::{DateTime, Utc};
use eyre::WrapErr;
use harmony_traits::KeyValueStore;
use serde::{Deserialize, Serialize};

use crate::config::HistoryCfg;
use crate::error::{HarmonyError, Result};
use crate::measurement::Measurement;
use crate::store::FileStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Milliseconds since the Unix epoch at save time. Not guarded against collisions.
    pub id: String,
    pub date: DateTime<Utc>,
    pub measurements: Vec<Measurement>,
}

pub struct HistoryStore<K: KeyValueStore> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> core::fmt::Debug for HistoryStore<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HistoryStore").field("key", &self.key).finish()
    }
}

impl<K: KeyValueStore> HistoryStore<K> {
    pub fn new(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn into_inner(self) -> K {
        self.store
    }

    /// Read the full history in insertion order.
    ///
    /// A missing key is an empty history. So is a payload that fails to parse:
    /// corrupt storage is logged and ignored rather than surfaced.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        let raw = self
            .store
            .get(&self.key)
            .map_err(|e| HarmonyError::Storage(e.to_string()))
            .wrap_err_with(|| format!("read history key {:?}", self.key))?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "history payload unparsable; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Append a snapshot stamped with the current time.
    pub fn persist_entry(&mut self, measurements: &[Measurement]) -> Result<HistoryEntry> {
        self.persist_entry_at(measurements, Utc::now())
    }

    /// Append a snapshot stamped at `at`.
    pub fn persist_entry_at(
        &mut self,
        measurements: &[Measurement],
        at: DateTime<Utc>,
    ) -> Result<HistoryEntry> {
        let mut entries = self.load()?;
        let entry = HistoryEntry {
            id: at.timestamp_millis().to_string(),
            date: at,
            measurements: measurements.to_vec(),
        };
        entries.push(entry.clone());
        self.write(&entries)?;
        tracing::info!(id = %entry.id, measurements = measurements.len(), total = entries.len(), "history entry saved");
        Ok(entry)
    }

    /// Delete the whole history.
    pub fn clear(&mut self) -> Result<()> {
        self.store
            .delete(&self.key)
            .map_err(|e| HarmonyError::Storage(e.to_string()))
            .wrap_err_with(|| format!("clear history key {:?}", self.key))?;
        tracing::info!(key = %self.key, "history cleared");
        Ok(())
    }

    /// Every stored measurement, re-dated to the entry it was saved in.
    pub fn measurements(&self) -> Result<Vec<Measurement>> {
        Ok(self
            .load()?
            .into_iter()
            .flat_map(|entry| {
                let date = entry.date;
                entry
                    .measurements
                    .into_iter()
                    .map(move |m| m.with_date(date))
            })
            .collect())
    }

    fn write(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        let payload = serde_json::to_string(entries)
            .map_err(|e| HarmonyError::Serialization(e.to_string()))?;
        self.store
            .set(&self.key, &payload)
            .map_err(|e| HarmonyError::Storage(e.to_string()))
            .wrap_err_with(|| format!("write history key {:?}", self.key))?;
        Ok(())
    }
}

impl HistoryStore<FileStore> {
    /// File-backed history under `cfg.dir`; `None` when no directory is configured.
    pub fn open(cfg: &HistoryCfg) -> Option<Self> {
        cfg.dir
            .as_ref()
            .map(|dir| Self::new(FileStore::new(dir), cfg.storage_key.clone()))
    }
}
