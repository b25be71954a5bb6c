use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use crate::{KeyValueStore, StoreError, log};

/// Store kept in memory. Clones share the same entries.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get_sync(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn set_sync(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.get_sync(key)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.set_sync(key, value)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}

const KEY_LOG: &str = "log";

impl log::Repository for MemoryStore {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match self.get_sync(KEY_LOG) {
            Ok(Some(entries)) => {
                serde_json::from_str(&entries).map_err(|err| log::Error::Unknown(err.to_string()))
            }
            Ok(None) => Ok(VecDeque::new()),
            Err(err) => Err(log::Error::Unknown(err.to_string())),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::CAPACITY);
        let value =
            serde_json::to_string(&entries).map_err(|err| log::Error::Unknown(err.to_string()))?;
        self.set_sync(KEY_LOG, value)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
