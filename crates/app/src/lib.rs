//! # fitlog app
//!
//! The application layer of the fitness journal. It wires the calendar engine
//! from `fitlog-core` to the store from `fitlog-db`.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven runtime settings
//! - **Journal**: the state-owning controller and its action dispatch
//! - **Photo**: asynchronous ingestion of photo files into data URIs
//! - **Render**: plain-text views of the month, day detail and member list

/// Configuration loaded from the environment
pub mod config;
/// State-owning controller and action dispatch
pub mod journal;
/// Photo file ingestion
pub mod photo;
/// Terminal views
pub mod render;

pub use config::{AppConfig, CorruptionPolicy};
pub use journal::{Action, Completed, Journal, JournalOptions, JournalState, Outcome, WorkoutForm};
pub use photo::{FsPhotoReader, PhotoReader};
