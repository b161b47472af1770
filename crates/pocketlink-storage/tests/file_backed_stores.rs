use std::num::NonZeroU32;
use std::sync::Arc;

use jiff::Timestamp;
use pocketlink_core::{EventSink, LinkEvent, LinkStore, ShortCode, ShortLinkRecord};
use pocketlink_storage::{FileStorage, JsonEventLog, JsonLinkStore, KeyValueStore, LINKS_KEY};

fn record(code: &str) -> ShortLinkRecord {
    ShortLinkRecord::new(
        "https://example.com",
        ShortCode::new(code).unwrap(),
        "https://sho.rt/",
        Timestamp::from_millisecond(1_700_000_000_000).unwrap(),
        NonZeroU32::new(30).unwrap(),
    )
}

#[test]
fn links_and_events_share_one_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::open(tmp.path()).unwrap());

    let links = JsonLinkStore::new(Arc::clone(&storage));
    let events = JsonEventLog::new(Arc::clone(&storage));

    links.save(&[record("abc123")]).unwrap();
    events.record(LinkEvent::UrlShortened {
        index: 0,
        original_url: "https://example.com".into(),
        short_code: ShortCode::new("abc123").unwrap(),
        expiry_at: Timestamp::from_millisecond(1_700_001_800_000).unwrap(),
    });

    assert!(tmp.path().join("shortenedLinks.json").exists());
    assert!(tmp.path().join("appLogs.json").exists());

    // a fresh process sees both
    let reopened = Arc::new(FileStorage::open(tmp.path()).unwrap());
    assert_eq!(JsonLinkStore::new(Arc::clone(&reopened)).load().len(), 1);
    assert_eq!(JsonEventLog::new(reopened).entries().len(), 1);
}

#[test]
fn hand_edited_garbage_degrades_to_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(tmp.path()).unwrap();
    storage.set_item(LINKS_KEY, r#"[{"shortCode": 12}]"#).unwrap();

    assert!(JsonLinkStore::new(storage).load().is_empty());
}
