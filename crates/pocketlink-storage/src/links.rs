use crate::kv::KeyValueStore;
use pocketlink_core::{LinkStore, ShortLinkRecord, StorageError};
use tracing::{debug, warn};

/// Key the link collection is stored under.
pub const LINKS_KEY: &str = "shortenedLinks";

/// A [`LinkStore`] keeping the collection as one JSON array in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct JsonLinkStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> JsonLinkStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, LINKS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> LinkStore for JsonLinkStore<S> {
    fn load(&self) -> Vec<ShortLinkRecord> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read link collection, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ShortLinkRecord>>(&raw) {
            Ok(records) => {
                let records: Vec<ShortLinkRecord> = records
                    .into_iter()
                    .filter(|record| {
                        let keep = record.is_well_formed();
                        if !keep {
                            warn!(key = %self.key, code = %record.short_code(), "dropping malformed stored record");
                        }
                        keep
                    })
                    .collect();
                debug!(key = %self.key, count = records.len(), "loaded link collection");
                records
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored link collection is unparsable, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[ShortLinkRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(key = %self.key, count = records.len(), "saved link collection");
        Ok(())
    }
}
