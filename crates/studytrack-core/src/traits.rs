//! The status source trait and the paginated fetch contract.
//!
//! Implemented by the `studytrack-sources` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::records::StatusRecord;

/// Default records per page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;
/// Hard cap on records fetched in total.
pub const DEFAULT_MAX_RECORDS: usize = 25_000;

/// A paginated store of status records.
///
/// Pages are returned most-recently-updated first; offset 0 is the newest
/// row. A page shorter than `limit` marks the end of the data.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Human-readable source name (e.g. "json-file").
    fn name(&self) -> &str;

    /// Fetch up to `limit` records starting at `offset`.
    async fn fetch_page(&self, offset: usize, limit: usize)
        -> Result<Vec<StatusRecord>, SourceError>;
}

/// Paging limits for [`fetch_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    pub page_size: usize,
    pub max_records: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

/// Fetch every record up to `options.max_records`, newest first.
///
/// The result is not deduplicated; see [`crate::records::dedup_latest`].
pub async fn fetch_all(
    source: &dyn StatusSource,
    options: FetchOptions,
) -> Result<Vec<StatusRecord>, SourceError> {
    let page_size = options.page_size.max(1);
    let mut records: Vec<StatusRecord> = Vec::new();

    while records.len() < options.max_records {
        let limit = page_size.min(options.max_records - records.len());
        let page = source.fetch_page(records.len(), limit).await?;
        let short = page.len() < limit;
        records.extend(page);
        if short {
            return Ok(records);
        }
    }

    records.truncate(options.max_records);
    let more = source.fetch_page(records.len(), 1).await?;
    if !more.is_empty() {
        tracing::warn!(
            "{}: stopped at {} records; older statuses were not fetched",
            source.name(),
            options.max_records
        );
    }
    Ok(records)
}
