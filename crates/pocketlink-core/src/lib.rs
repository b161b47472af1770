//! Core types and ports for the pocketlink URL shortener.
//!
//! This crate holds the data model shared by the generator, storage and
//! registry crates: short codes, short-link records, the five-slot entry
//! form, the event-log records and the storage/clock/event ports.

pub mod clock;
pub mod entry;
pub mod error;
pub mod event;
pub mod record;
pub mod repository;
pub mod shortcode;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{trim_field, CandidateEntry, ShortenForm, MAX_BATCH_SIZE};
pub use error::{ErrorKind, FormError, ShortCodeError, StorageError};
pub use event::{EventSink, LinkEvent, LogEntry, NoopEventSink};
pub use record::{LinkStatus, ShortLinkRecord};
pub use repository::LinkStore;
pub use shortcode::ShortCode;
