use crate::settings::RegistrySettings;
use jiff::Timestamp;
use pocketlink_core::entry::{parse_leading_integer, parse_original_url, trim_field};
use pocketlink_core::{
    CandidateEntry, Clock, ErrorKind, EventSink, LinkEvent, LinkStore, NoopEventSink, ShortCode,
    ShortLinkRecord, ShortenForm, StorageError, SystemClock,
};
use pocketlink_generator::{CodeAllocator, Generator};
use std::collections::HashSet;
use std::num::NonZeroU32;
use tracing::{debug, error, info, warn};

/// A rejected form slot and the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub kind: ErrorKind,
}

/// What became of one submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// New records, in slot order.
    pub accepted: Vec<ShortLinkRecord>,
    /// Rejected slots, in slot order.
    pub rejected: Vec<Rejection>,
    /// Whether the collection reached the store after this batch.
    pub persisted: bool,
}

impl BatchOutcome {
    /// Number of non-blank slots that were evaluated.
    pub fn processed(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed() == 0
    }
}

/// Owner of the short-link collection.
///
/// The collection is loaded from the [`LinkStore`] once, kept in memory and
/// written back whole after every batch that accepted something. Short codes
/// are unique across the collection; records are never changed or removed.
pub struct LinkRegistry<S, G, E = NoopEventSink, C = SystemClock> {
    store: S,
    allocator: CodeAllocator<G>,
    events: E,
    clock: C,
    settings: RegistrySettings,
    records: Vec<ShortLinkRecord>,
    codes: HashSet<ShortCode>,
    dirty: bool,
}

impl<S: LinkStore, G: Generator> LinkRegistry<S, G> {
    /// Creates a registry using the system clock, default settings and no event log.
    pub fn new(store: S, allocator: CodeAllocator<G>) -> Self {
        Self::with_parts(
            store,
            allocator,
            NoopEventSink,
            SystemClock,
            RegistrySettings::default(),
        )
    }
}

impl<S: LinkStore, G: Generator, E: EventSink, C: Clock> LinkRegistry<S, G, E, C> {
    pub fn with_parts(
        store: S,
        allocator: CodeAllocator<G>,
        events: E,
        clock: C,
        settings: RegistrySettings,
    ) -> Self {
        let mut records = Vec::new();
        let mut codes = HashSet::new();
        for record in store.load() {
            if codes.insert(record.short_code().clone()) {
                records.push(record);
            } else {
                warn!(code = %record.short_code(), "dropping stored record with duplicate short code");
            }
        }
        info!(count = records.len(), "link registry loaded");

        Self {
            store,
            allocator,
            events,
            clock,
            settings,
            records,
            codes,
            dirty: false,
        }
    }

    pub fn with_events<E2: EventSink>(self, events: E2) -> LinkRegistry<S, G, E2, C> {
        LinkRegistry {
            store: self.store,
            allocator: self.allocator,
            events,
            clock: self.clock,
            settings: self.settings,
            records: self.records,
            codes: self.codes,
            dirty: self.dirty,
        }
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> LinkRegistry<S, G, E, C2> {
        LinkRegistry {
            store: self.store,
            allocator: self.allocator,
            events: self.events,
            clock,
            settings: self.settings,
            records: self.records,
            codes: self.codes,
            dirty: self.dirty,
        }
    }

    pub fn with_settings(mut self, settings: RegistrySettings) -> Self {
        self.settings = settings;
        self
    }

    /// The collection in insertion order.
    pub fn records(&self) -> &[ShortLinkRecord] {
        &self.records
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn short_url_prefix(&self) -> &str {
        &self.settings.short_url_prefix
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Validates every non-blank slot of `form` and commits the accepted ones.
    ///
    /// Slots are handled independently in order, so a bad slot never blocks
    /// its siblings and an earlier slot wins a same-batch code clash.
    /// Accepted slots are cleared; rejected slots keep their input and carry
    /// the error. Never fails: storage trouble shows up as
    /// `persisted == false` and is retried on the next flush.
    pub fn submit_batch(&mut self, form: &mut ShortenForm) -> BatchOutcome {
        let now = self.clock.now();
        let mut accepted: Vec<ShortLinkRecord> = Vec::new();
        let mut rejected = Vec::new();
        let mut batch_codes: HashSet<ShortCode> = HashSet::new();

        for (index, entry) in form.slots_mut().iter_mut().enumerate() {
            if entry.is_blank() {
                continue;
            }

            match self.accept(index, entry, now, &batch_codes) {
                Ok(record) => {
                    batch_codes.insert(record.short_code().clone());
                    entry.clear();
                    accepted.push(record);
                }
                Err(kind) => {
                    entry.reject(kind);
                    rejected.push(Rejection { index, kind });
                }
            }
        }

        if !accepted.is_empty() {
            self.codes.extend(batch_codes);
            self.records.extend(accepted.iter().cloned());
            self.dirty = true;
        }

        let persisted = match self.flush() {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, pending = self.records.len(), "failed to persist link collection");
                false
            }
        };

        info!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            persisted,
            "processed batch"
        );

        BatchOutcome {
            accepted,
            rejected,
            persisted,
        }
    }

    /// Writes the whole collection to the store if it has unsaved changes.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        if !self.dirty {
            return Ok(());
        }
        self.store.save(&self.records)?;
        self.dirty = false;
        Ok(())
    }

    fn accept(
        &mut self,
        index: usize,
        entry: &CandidateEntry,
        now: Timestamp,
        batch_codes: &HashSet<ShortCode>,
    ) -> Result<ShortLinkRecord, ErrorKind> {
        let original_url = trim_field(entry.original_url());
        if parse_original_url(original_url).is_err() {
            return Err(self.reject(index, ErrorKind::InvalidUrl, original_url));
        }

        let custom_code = trim_field(entry.custom_code());
        let short_code = if custom_code.is_empty() {
            let codes = &self.codes;
            self.allocator
                .allocate(|code| codes.contains(code) || batch_codes.contains(code))
                .map_err(|e| {
                    error!(index, error = %e, "could not allocate a short code");
                    ErrorKind::CodeUnavailable
                })?
        } else {
            let code = ShortCode::new(custom_code)
                .map_err(|_| self.reject(index, ErrorKind::InvalidShortcode, custom_code))?;
            if self.codes.contains(&code) || batch_codes.contains(&code) {
                return Err(self.reject(index, ErrorKind::ShortcodeCollision, custom_code));
            }
            code
        };

        let validity = resolve_validity(
            entry.validity(),
            self.settings.default_validity_minutes,
            self.settings.max_validity_minutes,
        );
        let record = ShortLinkRecord::new(
            original_url,
            short_code,
            &self.settings.short_url_prefix,
            now,
            validity,
        );

        debug!(index, code = %record.short_code(), validity_minutes = validity.get(), "accepted entry");
        self.events.record(LinkEvent::UrlShortened {
            index,
            original_url: record.original_url().to_string(),
            short_code: record.short_code().clone(),
            expiry_at: record.expiry_at(),
        });
        Ok(record)
    }

    fn reject(&self, index: usize, kind: ErrorKind, input: &str) -> ErrorKind {
        debug!(index, input, reason = %kind, "rejected entry");
        let input = input.to_string();
        let event = match kind {
            ErrorKind::InvalidUrl => LinkEvent::InvalidUrl { index, input },
            ErrorKind::InvalidShortcode => LinkEvent::InvalidShortcode { index, input },
            ErrorKind::ShortcodeCollision => LinkEvent::ShortcodeCollision { index, input },
            ErrorKind::CodeUnavailable => return kind,
        };
        self.events.record(event);
        kind
    }
}

/// Turns the raw validity field into minutes.
///
/// The leading integer is used when positive (clamped to `max`); blank,
/// non-numeric and non-positive input falls back to `default`.
pub fn resolve_validity(raw: &str, default: NonZeroU32, max: NonZeroU32) -> NonZeroU32 {
    match parse_leading_integer(raw) {
        Some(minutes) if minutes > 0 => {
            let clamped = minutes.min(i64::from(max.get()));
            u32::try_from(clamped)
                .ok()
                .and_then(NonZeroU32::new)
                .unwrap_or(default)
        }
        _ => default,
    }
}
