//! Persistence for the soil reading and prediction history
//!
//! The store is an explicit object loaded once per session. Any string
//! key-value backend can hold it: the browser uses `localStorage`, the server
//! and tests use [`MemoryStore`].

use std::collections::HashMap;

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::models::{HistoryLog, HistoryRecord, SoilReading};
use crate::validation::validate_soil_reading;

/// Key holding the JSON-encoded soil reading
pub const SOIL_KEY: &str = "soilData";

/// Key holding the JSON-encoded history list
pub const HISTORY_KEY: &str = "yieldHistory";

/// A string key-value backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AdvisoryResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AdvisoryResult<()>;
    fn remove(&mut self, key: &str) -> AdvisoryResult<()>;
}

/// Process-local backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AdvisoryResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AdvisoryResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AdvisoryResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Session state backed by a key-value store
///
/// Reads both entries on [`AdvisoryStore::load`] and writes through on every
/// change, so the backend always matches the in-memory copy.
#[derive(Debug)]
pub struct AdvisoryStore<S> {
    backend: S,
    soil: Option<SoilReading>,
    history: HistoryLog,
}

impl<S: KeyValueStore> AdvisoryStore<S> {
    /// Load the soil reading and history from `backend`
    pub fn load(backend: S) -> AdvisoryResult<Self> {
        let soil = match backend.get(SOIL_KEY)? {
            Some(raw) => Some(
                serde_json::from_str(&raw)
                    .map_err(|source| AdvisoryError::CorruptEntry { key: SOIL_KEY, source })?,
            ),
            None => None,
        };

        let history = match backend.get(HISTORY_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|source| AdvisoryError::CorruptEntry { key: HISTORY_KEY, source })?,
            None => HistoryLog::new(),
        };

        Ok(Self {
            backend,
            soil,
            history,
        })
    }

    pub fn soil(&self) -> Option<&SoilReading> {
        self.soil.as_ref()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Validate and persist a new soil reading, replacing the previous one
    pub fn save_soil(&mut self, reading: &SoilReading) -> AdvisoryResult<()> {
        validate_soil_reading(reading)?;
        let raw = serde_json::to_string(reading)
            .map_err(|e| AdvisoryError::Storage(format!("cannot encode soil reading: {}", e)))?;
        self.backend.set(SOIL_KEY, &raw)?;
        self.soil = Some(reading.clone());
        Ok(())
    }

    /// Append a record to the history log
    pub fn record(&mut self, record: HistoryRecord) -> AdvisoryResult<()> {
        let mut history = self.history.clone();
        history.push(record);
        self.write_history(&history)?;
        self.history = history;
        Ok(())
    }

    /// Delete the whole log
    pub fn clear_history(&mut self) -> AdvisoryResult<()> {
        self.backend.remove(HISTORY_KEY)?;
        self.history.clear();
        Ok(())
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn write_history(&mut self, history: &HistoryLog) -> AdvisoryResult<()> {
        let raw = serde_json::to_string(history)
            .map_err(|e| AdvisoryError::Storage(format!("cannot encode history: {}", e)))?;
        self.backend.set(HISTORY_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FarmInput, YieldResult};
    use crate::types::{Crop, SoilType};
    use rust_decimal::Decimal;

    fn sample_record() -> HistoryRecord {
        let input =
            FarmInput::new(Crop::Wheat, SoilType::Loamy, Decimal::ONE, Decimal::from(100)).unwrap();
        HistoryRecord::new(&input, &YieldResult::from_value(Decimal::new(36, 1)), None)
    }

    #[test]
    fn test_empty_backend_loads_empty_session() {
        let store = AdvisoryStore::load(MemoryStore::new()).unwrap();
        assert!(store.soil().is_none());
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_state_survives_reload() {
        let mut store = AdvisoryStore::load(MemoryStore::new()).unwrap();
        let soil = SoilReading::new(
            Decimal::new(65, 1),
            Decimal::ONE,
            Decimal::ONE,
            Decimal::ONE,
        );
        store.save_soil(&soil).unwrap();
        store.record(sample_record()).unwrap();
        store.record(sample_record()).unwrap();

        let reloaded = AdvisoryStore::load(store.backend().clone()).unwrap();
        assert_eq!(reloaded.soil(), Some(&soil));
        assert_eq!(reloaded.history().len(), 2);
    }

    #[test]
    fn test_clear_removes_entry() {
        let mut store = AdvisoryStore::load(MemoryStore::new()).unwrap();
        store.record(sample_record()).unwrap();
        assert!(store.backend().contains(HISTORY_KEY));
        store.clear_history().unwrap();
        assert!(!store.backend().contains(HISTORY_KEY));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_invalid_soil_is_not_saved() {
        let mut store = AdvisoryStore::load(MemoryStore::new()).unwrap();
        let soil = SoilReading::new(
            Decimal::from(7),
            Decimal::from(-1),
            Decimal::ONE,
            Decimal::ONE,
        );
        assert!(store.save_soil(&soil).is_err());
        assert!(store.soil().is_none());
        assert!(!store.backend().contains(SOIL_KEY));
    }

    #[test]
    fn test_corrupt_entry_names_key() {
        let mut backend = MemoryStore::new();
        backend.set(HISTORY_KEY, "not json").unwrap();
        match AdvisoryStore::load(backend) {
            Err(AdvisoryError::CorruptEntry { key, .. }) => assert_eq!(key, HISTORY_KEY),
            other => panic!("expected corrupt entry, got {:?}", other.map(|_| ())),
        }
    }
}
