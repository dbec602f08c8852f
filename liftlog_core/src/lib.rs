#![forbid(unsafe_code)]

//! Core workout progression and history engine for liftlog.
//!
//! This crate provides:
//! - Domain types (performance entries, sessions, preferences)
//! - Key-value persistence of JSON documents
//! - Exercise history ledger and progression advice
//! - Completion log, weekly alternation and statistics

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod units;
pub mod store;
pub mod preferences;
pub mod week_counter;
pub mod ledger;
pub mod progression;
pub mod completion_log;
pub mod stats;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::{clear_all_data, FileStore, KvStore, MemoryStore};
pub use progression::{suggest, Suggestion};
pub use stats::{summarize, WorkoutStats};
pub use export::export_exercise_history;
