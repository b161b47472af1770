use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::num::NonZeroU32;

/// A stored short link.
///
/// Records are immutable: every field is set once by [`ShortLinkRecord::new`]
/// and only exposed through getters. The serialized form uses camelCase keys
/// and epoch-millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLinkRecord {
    original_url: String,
    short_code: ShortCode,
    short_url: String,
    #[serde(with = "epoch_millis")]
    expiry_at: Timestamp,
    #[serde(with = "epoch_millis")]
    created_at: Timestamp,
}

impl ShortLinkRecord {
    /// Creates a record valid for `validity_minutes` from `created_at`.
    ///
    /// The short URL is `prefix` followed by the code. Expiry saturates at
    /// [`Timestamp::MAX`].
    pub fn new(
        original_url: impl Into<String>,
        short_code: ShortCode,
        prefix: &str,
        created_at: Timestamp,
        validity_minutes: NonZeroU32,
    ) -> Self {
        let lifetime = SignedDuration::from_mins(i64::from(validity_minutes.get()));
        let expiry_at = created_at.checked_add(lifetime).unwrap_or(Timestamp::MAX);

        Self {
            original_url: original_url.into(),
            short_url: short_code.to_url(prefix),
            short_code,
            expiry_at,
            created_at,
        }
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn short_code(&self) -> &ShortCode {
        &self.short_code
    }

    pub fn short_url(&self) -> &str {
        &self.short_url
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn expiry_at(&self) -> Timestamp {
        self.expiry_at
    }

    /// Active up to and including `expiry_at`, expired strictly after it.
    pub fn status(&self, now: Timestamp) -> LinkStatus {
        if now > self.expiry_at {
            LinkStatus::Expired
        } else {
            LinkStatus::Active
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.status(now) == LinkStatus::Expired
    }

    /// Whether a deserialized record still holds what [`ShortLinkRecord::new`]
    /// guarantees: an alphanumeric code, a short URL ending in that code and
    /// an expiry after creation.
    pub fn is_well_formed(&self) -> bool {
        let code = self.short_code.as_str();
        !code.is_empty()
            && code.chars().all(|c| c.is_ascii_alphanumeric())
            && self.short_url.ends_with(code)
            && self.expiry_at > self.created_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkStatus {
    Active,
    Expired,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Active => "Active",
            LinkStatus::Expired => "Expired",
        }
    }
}

impl Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes a [`Timestamp`] as integer milliseconds since the Unix epoch.
pub(crate) mod epoch_millis {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(timestamp.as_millisecond())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        Timestamp::from_millisecond(millis).map_err(serde::de::Error::custom)
    }
}
