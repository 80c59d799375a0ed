//! Key-value persistence port.
//!
//! Every record is a JSON string under a composite key. Reads tolerate
//! absent keys and malformed payloads: both mean "no prior state", and
//! malformed data is logged and discarded rather than surfaced.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub const STATS_KEY: &str = "stats";
pub const APPSTATE_KEY: &str = "appstate";
pub const MOCK_PERF_KEY: &str = "mock_perf";

pub fn session_key(topic_id: &str) -> String {
    format!("session:{topic_id}")
}

pub fn selection_key(topic_id: &str) -> String {
    format!("selection:{topic_id}")
}

/// Injected storage port. The engine only ever sees this trait, so
/// tests run against the in-memory map directly.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory map mirrored into the eframe storage backend on save.
///
/// Removal writes an empty-string tombstone: the backend has no delete
/// operation, and the read contract already treats empty as absent.
#[derive(Default)]
pub struct StoreMap {
    entries: BTreeMap<String, String>,
}

impl StoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pulls the given keys out of the backend. Unknown keys stay
    /// absent; empty strings are prior tombstones.
    pub fn from_storage(
        storage: &dyn eframe::Storage,
        keys: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut entries = BTreeMap::new();
        for key in keys {
            if let Some(value) = storage.get_string(&key) {
                if !value.is_empty() {
                    entries.insert(key, value);
                }
            }
        }
        Self { entries }
    }

    pub fn flush_into(&self, storage: &mut dyn eframe::Storage) {
        for (key, value) in &self.entries {
            storage.set_string(key, value.clone());
        }
    }

    /// Tombstones every entry; flushed, this wipes the backend copy
    /// of everything the app ever stored.
    pub fn clear_all(&mut self) {
        for value in self.entries.values_mut() {
            value.clear();
        }
    }
}

impl KeyValueStore for StoreMap {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.insert(key.to_owned(), String::new());
    }
}

/// Parse-or-default read: absent or malformed JSON both come back as
/// `None`, malformed additionally logs a warning.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("discarding malformed record at {key}: {err}");
            None
        }
    }
}

pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, raw),
        Err(err) => log::error!("failed to encode record for {key}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_keys_read_as_absent() {
        let mut store = StoreMap::new();
        store.set("stats", "{}".to_owned());
        assert!(store.get("stats").is_some());
        store.remove("stats");
        assert_eq!(store.get("stats"), None);
    }

    #[test]
    fn malformed_json_is_treated_as_absent() {
        let mut store = StoreMap::new();
        store.set("stats", "{not json".to_owned());
        let loaded: Option<Vec<u32>> = load_json(&store, "stats");
        assert!(loaded.is_none());
    }

    #[test]
    fn round_trips_records() {
        let mut store = StoreMap::new();
        save_json(&mut store, "k", &vec![1u32, 2, 3]);
        let loaded: Option<Vec<u32>> = load_json(&store, "k");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn clear_all_tombstones_everything() {
        let mut store = StoreMap::new();
        store.set("a", "1".to_owned());
        store.set("b", "2".to_owned());
        store.clear_all();
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), None);
    }
}
