use clap::{Parser, Subcommand, ValueEnum};
use pocketlink_core::CandidateEntry;
use pocketlink_registry::settings::{DEFAULT_SHORT_URL_PREFIX, DEFAULT_VALIDITY_MINUTES};
use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "POCKETLINK_DATA_DIR";
pub const SHORT_URL_PREFIX_ENV: &str = "POCKETLINK_SHORT_URL_PREFIX";
pub const DEFAULT_VALIDITY_ENV: &str = "POCKETLINK_DEFAULT_VALIDITY_MINUTES";

pub const DEFAULT_DATA_DIR: &str = ".pocketlink";

/// Placeholder for "no custom code" when only minutes are given.
const SKIP: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pocketlink", about = "Shorten up to five URLs at a time")]
pub struct CLI {
    /// Directory holding the link collection and the event log.
    #[arg(long, global = true, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    #[arg(
        long,
        global = true,
        env = SHORT_URL_PREFIX_ENV,
        default_value = DEFAULT_SHORT_URL_PREFIX,
    )]
    pub prefix: String,

    /// Minutes a link stays active when its validity is left blank.
    #[arg(
        long,
        global = true,
        env = DEFAULT_VALIDITY_ENV,
        default_value_t = DEFAULT_VALIDITY_MINUTES,
    )]
    pub default_validity: NonZeroU32,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a batch of up to five URLs.
    Shorten {
        /// `"URL [CODE [MINUTES]]"`; repeat for each slot.
        #[arg(long = "entry", required = true, value_parser = parse_entry)]
        entries: Vec<CandidateEntry>,
    },
    /// Show every link with its expiry and status.
    Stats,
    /// Show the recently shortened links panel.
    Recent,
    /// Dump the event log.
    Logs,
}

/// Splits `URL [CODE [MINUTES]]` into a form entry.
///
/// Parts are whitespace separated since a URL cannot hold unescaped
/// whitespace but may well hold commas. Use `-` to skip the code.
fn parse_entry(raw: &str) -> Result<CandidateEntry, String> {
    let mut parts = raw.split_whitespace();
    let url = parts.next().ok_or_else(|| "entry needs a URL".to_string())?;
    let code = parts.next().filter(|code| *code != SKIP).unwrap_or_default();
    let validity = parts.next().unwrap_or_default();

    if let Some(extra) = parts.next() {
        return Err(format!("unexpected '{extra}' after URL, code and minutes"));
    }

    Ok(CandidateEntry::new(url)
        .with_custom_code(code)
        .with_validity(validity))
}
