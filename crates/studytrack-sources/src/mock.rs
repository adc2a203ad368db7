//! In-memory source for testing without a data export.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use studytrack_core::error::SourceError;
use studytrack_core::records::{sort_newest_first, StatusRecord};
use studytrack_core::traits::StatusSource;

/// A status source backed by a vector of records.
pub struct MemorySource {
    records: Vec<StatusRecord>,
    /// Fail every fetch with `Unavailable(message)` when set.
    failure: Option<String>,
    /// Number of pages requested.
    call_count: AtomicU32,
    /// Last (offset, limit) requested.
    last_request: Mutex<Option<(usize, usize)>>,
}

impl MemorySource {
    /// Create a source over `records`, sorted newest first.
    pub fn new(mut records: Vec<StatusRecord>) -> Self {
        sort_newest_first(&mut records);
        Self {
            records,
            failure: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a source whose every fetch fails.
    pub fn unavailable(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// Get the number of pages requested from this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last (offset, limit) requested.
    pub fn last_request(&self) -> Option<(usize, usize)> {
        *self.last_request.lock().unwrap()
    }
}

#[async_trait]
impl StatusSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<StatusRecord>, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some((offset, limit));

        if let Some(message) = &self.failure {
            return Err(SourceError::Unavailable(message.clone()));
        }

        Ok(self
            .records
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
