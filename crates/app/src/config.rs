//! # Journal Configuration Module
//!
//! Loads the runtime configuration of the journal from environment variables,
//! with defaults for everything.
//!
//! ## Environment Variables
//!
//! - `FITLOG_DATA_DIR`: Directory holding the persisted collections (default: "./fitlog-data")
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `FITLOG_WEEK_START`: First column of the calendar, "sunday" or "monday" (default: "sunday")
//! - `FITLOG_ON_CORRUPT`: What to do with unreadable stored data, "fail" or "reset" (default: "fail")

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use eyre::{Result, eyre};
use fitlog_core::dates::WeekStart;
use tracing::Level;

/// What `Journal::open` does when a stored collection cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptionPolicy {
    /// Surface the error and refuse to open.
    #[default]
    Fail,
    /// Back the blob up under `<key>.corrupt` and start that collection empty.
    Reset,
}

impl FromStr for CorruptionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(CorruptionPolicy::Fail),
            "reset" => Ok(CorruptionPolicy::Reset),
            other => Err(format!("unknown corruption policy '{}', expected fail or reset", other)),
        }
    }
}

/// Configuration for the journal
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory of the file-backed store
    pub data_dir: PathBuf,

    /// Log level for the application
    pub log_level: Level,

    /// First weekday of each calendar row
    pub week_start: WeekStart,

    /// Handling of unreadable stored data
    pub on_corrupt: CorruptionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./fitlog-data"),
            log_level: Level::INFO,
            week_start: WeekStart::Sunday,
            on_corrupt: CorruptionPolicy::Fail,
        }
    }
}

fn parse_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `FITLOG_WEEK_START` or `FITLOG_ON_CORRUPT` holds an
    /// unrecognised value. An unknown `LOG_LEVEL` falls back to info.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("FITLOG_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let log_level = lookup("LOG_LEVEL")
            .map(|level| parse_level(&level))
            .unwrap_or(defaults.log_level);

        let week_start = match lookup("FITLOG_WEEK_START") {
            Some(value) => value
                .parse()
                .map_err(|e| eyre!("Invalid FITLOG_WEEK_START value: {}", e))?,
            None => defaults.week_start,
        };

        let on_corrupt = match lookup("FITLOG_ON_CORRUPT") {
            Some(value) => value
                .parse()
                .map_err(|e| eyre!("Invalid FITLOG_ON_CORRUPT value: {}", e))?,
            None => defaults.on_corrupt,
        };

        Ok(Self {
            data_dir,
            log_level,
            week_start,
            on_corrupt,
        })
    }
}
