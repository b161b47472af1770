use crate::kv::{KeyValueStore, Result};
use dashmap::DashMap;

/// In-memory implementation of [`KeyValueStore`] using DashMap.
///
/// Data lives as long as the value does; wrap it in an `Arc` to share one
/// store between the link store and the event log.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    storage: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.storage.get(key).map(|value| value.clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove(key);
        Ok(())
    }
}
