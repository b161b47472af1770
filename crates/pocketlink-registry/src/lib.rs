//! The link registry: batch validation, short-code allocation, expiry and
//! persistence of short links, plus the read-only views the UI renders.

pub mod registry;
pub mod settings;
pub mod view;

pub use registry::{resolve_validity, BatchOutcome, LinkRegistry, Rejection};
pub use settings::RegistrySettings;
pub use view::{format_timestamp, recent_links, statistics, LinkCard, StatsRow};
