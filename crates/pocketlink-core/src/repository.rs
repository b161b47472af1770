use crate::error::StorageError;
use crate::record::ShortLinkRecord;

/// Persistent home of the short-link collection.
///
/// The collection is read and written as a whole: there are no per-record
/// operations, so a backend only needs to hold one blob.
pub trait LinkStore: Send + Sync {
    /// Loads the stored collection in insertion order.
    ///
    /// Missing or unreadable data yields an empty collection instead of an error.
    fn load(&self) -> Vec<ShortLinkRecord>;

    /// Replaces the stored collection with `records`.
    fn save(&self, records: &[ShortLinkRecord]) -> Result<(), StorageError>;
}

impl<T: LinkStore + ?Sized> LinkStore for std::sync::Arc<T> {
    fn load(&self) -> Vec<ShortLinkRecord> {
        (**self).load()
    }

    fn save(&self, records: &[ShortLinkRecord]) -> Result<(), StorageError> {
        (**self).save(records)
    }
}
