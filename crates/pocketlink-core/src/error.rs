use thiserror::Error;

/// Why a single candidate entry was not accepted.
///
/// The `Display` output is the message shown next to the offending entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Shortcode must be alphanumeric (3-12 chars)")]
    InvalidShortcode,
    #[error("Shortcode already exists")]
    ShortcodeCollision,
    #[error("Could not allocate a unique shortcode")]
    CodeUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortCodeError {
    #[error("short code length must be between {min} and {max}, got {actual}")]
    Length {
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("short code must contain only ASCII letters and digits: '{0}'")]
    Characters(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a form holds at most {max} entries, got {actual}")]
    TooManyEntries { max: usize, actual: usize },
}

/// Errors raised by storage backends.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage io failed: {0}")]
    Io(String),
    #[error("storage serialization failed: {0}")]
    Serialization(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
