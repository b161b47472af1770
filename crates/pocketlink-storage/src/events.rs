use crate::kv::KeyValueStore;
use parking_lot::Mutex;
use pocketlink_core::{Clock, EventSink, LinkEvent, LogEntry, StorageError, SystemClock};
use tracing::warn;

/// Key the event log is stored under.
pub const EVENTS_KEY: &str = "appLogs";

/// An append-only event log kept as one JSON array in a [`KeyValueStore`].
///
/// Existing entries are loaded once at construction. Every recorded event is
/// timestamped, appended in memory and the whole array is written back.
pub struct JsonEventLog<S, C = SystemClock> {
    storage: S,
    key: String,
    clock: C,
    entries: Mutex<Vec<LogEntry>>,
}

impl<S: KeyValueStore> JsonEventLog<S, SystemClock> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> JsonEventLog<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        let entries = read_entries(&storage, EVENTS_KEY).unwrap_or_else(|e| {
            warn!(key = EVENTS_KEY, error = %e, "failed to read event log, starting empty");
            Vec::new()
        });

        Self {
            storage,
            key: EVENTS_KEY.to_string(),
            clock,
            entries: Mutex::new(entries),
        }
    }

    /// Returns every logged entry, oldest first.
    ///
    /// Reads the stored array so entries written by other handles show up;
    /// falls back to this handle's copy if storage cannot be read.
    pub fn entries(&self) -> Vec<LogEntry> {
        match read_entries(&self.storage, &self.key) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read event log, using cached entries");
                self.entries.lock().clone()
            }
        }
    }

    fn append(&self, entry: LogEntry) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        entries.push(entry);
        let raw = serde_json::to_string(&*entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set_item(&self.key, &raw)
    }
}

impl<S: KeyValueStore, C: Clock> EventSink for JsonEventLog<S, C> {
    fn record(&self, event: LinkEvent) {
        let name = event.name();
        let entry = LogEntry {
            timestamp: self.clock.now(),
            event,
        };
        if let Err(e) = self.append(entry) {
            warn!(key = %self.key, event = name, error = %e, "failed to persist event");
        }
    }
}

fn read_entries<S: KeyValueStore>(storage: &S, key: &str) -> Result<Vec<LogEntry>, StorageError> {
    match storage.get_item(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::InvalidData(e.to_string())),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use jiff::Timestamp;
    use pocketlink_core::ManualClock;
    use std::sync::Arc;

    fn invalid_url(index: usize) -> LinkEvent {
        LinkEvent::InvalidUrl {
            index,
            input: "nope".into(),
        }
    }

    #[test]
    fn appends_timestamped_entries() {
        let now: Timestamp = "2026-10-19T12:00:00Z".parse().unwrap();
        let log = JsonEventLog::with_clock(MemoryStorage::new(), ManualClock::new(now));

        log.record(invalid_url(0));
        log.record(invalid_url(3));

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp, now);
        assert_eq!(entries[1].event.index(), 3);
    }

    #[test]
    fn keeps_existing_entries() {
        let storage = Arc::new(MemoryStorage::new());
        JsonEventLog::new(Arc::clone(&storage)).record(invalid_url(0));

        let reopened = JsonEventLog::new(Arc::clone(&storage));
        reopened.record(invalid_url(1));

        let indexes: Vec<usize> = reopened.entries().iter().map(|e| e.event.index()).collect();
        assert_eq!(indexes, vec![0, 1]);
    }

    #[test]
    fn stored_as_json_array_under_app_logs() {
        let storage = Arc::new(MemoryStorage::new());
        JsonEventLog::new(Arc::clone(&storage)).record(invalid_url(2));

        let raw = storage.get_item(EVENTS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["event"], "INVALID_URL");
        assert_eq!(value[0]["index"], 2);
        assert!(value[0]["timestamp"].is_string());
    }

    #[test]
    fn corrupt_log_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(EVENTS_KEY, "nonsense").unwrap();

        let log = JsonEventLog::new(Arc::clone(&storage));
        log.record(invalid_url(4));

        assert_eq!(log.entries().len(), 1);
    }
}
