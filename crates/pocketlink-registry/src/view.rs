//! Read-only projections of the link collection for display.
//!
//! Status is recomputed from `now` on every call; nothing here touches the
//! registry's state.

use jiff::tz::TimeZone;
use jiff::Timestamp;
use pocketlink_core::{LinkStatus, ShortLinkRecord};

/// One row of the statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRow {
    pub short_url: String,
    pub original_url: String,
    pub expires_at: String,
    pub status: LinkStatus,
}

/// One card of the "recently shortened" panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCard {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    /// `"Expired"` once the link has expired, the formatted expiry otherwise.
    pub expires: String,
    pub expired: bool,
}

/// Formats `timestamp` as local wall-clock time in `tz`.
pub fn format_timestamp(timestamp: Timestamp, tz: &TimeZone) -> String {
    timestamp
        .to_zoned(tz.clone())
        .strftime("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Every record, in collection order, as a statistics row.
pub fn statistics(records: &[ShortLinkRecord], now: Timestamp, tz: &TimeZone) -> Vec<StatsRow> {
    records
        .iter()
        .map(|record| StatsRow {
            short_url: record.short_url().to_string(),
            original_url: record.original_url().to_string(),
            expires_at: format_timestamp(record.expiry_at(), tz),
            status: record.status(now),
        })
        .collect()
}

pub fn recent_links(records: &[ShortLinkRecord], now: Timestamp, tz: &TimeZone) -> Vec<LinkCard> {
    records
        .iter()
        .map(|record| {
            let expired = record.is_expired(now);
            let expires = if expired {
                LinkStatus::Expired.to_string()
            } else {
                format_timestamp(record.expiry_at(), tz)
            };
            LinkCard {
                original_url: record.original_url().to_string(),
                short_url: record.short_url().to_string(),
                short_code: record.short_code().to_string(),
                expires,
                expired,
            }
        })
        .collect()
}
