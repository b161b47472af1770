//! Storage backends for pocketlink.
//!
//! Everything is layered on [`KeyValueStore`], a small string-keyed blob store
//! in the spirit of browser local storage. [`JsonLinkStore`] keeps the link
//! collection under one key and [`JsonEventLog`] keeps the event log under
//! another.

pub mod events;
pub mod file;
pub mod kv;
pub mod links;
pub mod memory;

pub use events::{JsonEventLog, EVENTS_KEY};
pub use file::FileStorage;
pub use kv::{KeyValueStore, Result};
pub use links::{JsonLinkStore, LINKS_KEY};
pub use memory::MemoryStorage;
pub use pocketlink_core::StorageError;
