use crate::record::epoch_millis;
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A validation outcome or a successful shortening, as written to the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum LinkEvent {
    InvalidUrl {
        index: usize,
        input: String,
    },
    InvalidShortcode {
        index: usize,
        input: String,
    },
    ShortcodeCollision {
        index: usize,
        input: String,
    },
    UrlShortened {
        index: usize,
        original_url: String,
        short_code: ShortCode,
        #[serde(with = "epoch_millis")]
        expiry_at: Timestamp,
    },
}

impl LinkEvent {
    /// The form slot the event refers to.
    pub fn index(&self) -> usize {
        match self {
            LinkEvent::InvalidUrl { index, .. }
            | LinkEvent::InvalidShortcode { index, .. }
            | LinkEvent::ShortcodeCollision { index, .. }
            | LinkEvent::UrlShortened { index, .. } => *index,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LinkEvent::InvalidUrl { .. } => "INVALID_URL",
            LinkEvent::InvalidShortcode { .. } => "INVALID_SHORTCODE",
            LinkEvent::ShortcodeCollision { .. } => "SHORTCODE_COLLISION",
            LinkEvent::UrlShortened { .. } => "URL_SHORTENED",
        }
    }
}

/// One line of the event log: an ISO-8601 timestamp plus the flattened event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub event: LinkEvent,
}

/// Write-only destination for [`LinkEvent`]s.
///
/// Sinks must not fail the caller; a sink that cannot persist an event is
/// expected to report it through its own logging.
pub trait EventSink: Send + Sync {
    fn record(&self, event: LinkEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record(&self, _event: LinkEvent) {}
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn record(&self, event: LinkEvent) {
        (**self).record(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_event_shape() {
        let entry = LogEntry {
            timestamp: "2026-01-02T03:04:05Z".parse().unwrap(),
            event: LinkEvent::ShortcodeCollision {
                index: 1,
                input: "dup123".into(),
            },
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "timestamp": "2026-01-02T03:04:05Z",
                "event": "SHORTCODE_COLLISION",
                "index": 1,
                "input": "dup123",
            })
        );
    }

    #[test]
    fn shortened_event_shape() {
        let event = LinkEvent::UrlShortened {
            index: 0,
            original_url: "https://example.com".into(),
            short_code: ShortCode::new("abc123").unwrap(),
            expiry_at: Timestamp::from_millisecond(1_700_001_800_000).unwrap(),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "URL_SHORTENED");
        assert_eq!(value["originalUrl"], "https://example.com");
        assert_eq!(value["shortCode"], "abc123");
        assert_eq!(value["expiryAt"], 1_700_001_800_000_i64);
        assert_eq!(event.name(), "URL_SHORTENED");
        assert_eq!(event.index(), 0);
    }

    #[test]
    fn log_entry_reads_back() {
        let raw = r#"{"timestamp":"2026-01-02T03:04:05.123Z","event":"INVALID_URL","index":3,"input":"nope"}"#;
        let entry: LogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(
            entry.event,
            LinkEvent::InvalidUrl {
                index: 3,
                input: "nope".into()
            }
        );
    }
}
