mod cli;

use crate::cli::{Command, LogFormat, CLI};
use anyhow::Context;
use clap::Parser;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use pocketlink_core::{CandidateEntry, ShortenForm};
use pocketlink_generator::{CodeAllocator, RandomGenerator, RandomGeneratorSettings};
use pocketlink_registry::{recent_links, statistics, LinkRegistry, RegistrySettings};
use pocketlink_storage::{FileStorage, JsonEventLog, JsonLinkStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        data_dir = %config.data_dir.display(),
        prefix = %config.prefix,
        default_validity = config.default_validity.get(),
        "starting pocketlink"
    );

    let storage = Arc::new(
        FileStorage::open(&config.data_dir)
            .with_context(|| format!("cannot open data dir {}", config.data_dir.display()))?,
    );
    let events = Arc::new(JsonEventLog::new(Arc::clone(&storage)));

    let settings = RegistrySettings::builder()
        .short_url_prefix(config.prefix)
        .default_validity_minutes(config.default_validity)
        .build();
    let generator = RandomGenerator::new(RandomGeneratorSettings::default())?;
    let mut registry = LinkRegistry::new(
        JsonLinkStore::new(Arc::clone(&storage)),
        CodeAllocator::new(generator),
    )
    .with_events(Arc::clone(&events))
    .with_settings(settings);

    match config.command {
        Command::Shorten { entries } => shorten(&mut registry, entries)?,
        Command::Stats => {
            let rows = statistics(registry.records(), Timestamp::now(), &TimeZone::system());
            if rows.is_empty() {
                println!("No URLs shortened yet.");
            }
            for row in rows {
                println!(
                    "{}\t{}\t{}\t{}",
                    row.short_url, row.original_url, row.expires_at, row.status
                );
            }
        }
        Command::Recent => {
            let cards = recent_links(registry.records(), Timestamp::now(), &TimeZone::system());
            for card in cards {
                println!("{}", card.original_url);
                println!("  {}  (expires: {})", card.short_url, card.expires);
            }
        }
        Command::Logs => {
            for entry in events.entries() {
                println!("{}", serde_json::to_string(&entry)?);
            }
        }
    }

    Ok(())
}

fn shorten<S, G, E, C>(
    registry: &mut LinkRegistry<S, G, E, C>,
    entries: Vec<CandidateEntry>,
) -> anyhow::Result<()>
where
    S: pocketlink_core::LinkStore,
    G: pocketlink_generator::Generator,
    E: pocketlink_core::EventSink,
    C: pocketlink_core::Clock,
{
    let mut form = ShortenForm::from_entries(entries)?;
    let outcome = registry.submit_batch(&mut form);

    for record in &outcome.accepted {
        println!("{} -> {}", record.short_url(), record.original_url());
    }
    for rejection in &outcome.rejected {
        let slot = form.slot(rejection.index);
        let input = slot.map(|s| s.original_url()).unwrap_or_default();
        eprintln!("entry {}: {} ({input})", rejection.index + 1, rejection.kind);
    }
    if !outcome.persisted {
        eprintln!("warning: links were not saved and will be retried on the next run");
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
