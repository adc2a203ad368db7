//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with a `studytrack.toml` that parse fine but cannot be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An explicitly requested settings file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// `page_size` was zero.
    #[error("page_size must be at least 1")]
    ZeroPageSize,

    /// `max_records` cannot hold even one page.
    #[error("max_records ({max_records}) must be at least page_size ({page_size})")]
    CapBelowPageSize { page_size: usize, max_records: usize },
}
