//! studytrack-sources: status record sources and settings.
//!
//! Implements the `StatusSource` trait over JSON exports and in-memory
//! fixtures, and loads `studytrack.toml` settings.

pub mod config;
pub mod error;
pub mod json_file;
pub mod mock;

pub use config::{load_settings, StudytrackSettings};
pub use error::SettingsError;
pub use json_file::{load_completions, JsonFileSource};
pub use mock::MemorySource;
