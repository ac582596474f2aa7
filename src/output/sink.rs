//! The aggregation sink
//!
//! Every article visit publishes its record here. The sink accepts any number
//! of concurrent producers until it is closed; closing hands the collected
//! records to the single owner and rejects any later publish.

use crate::article::Article;
use crate::NewsrankError;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
enum SinkState {
    Open(Vec<Article>),
    Closed,
}

/// Collects article records until closed
#[derive(Debug)]
pub struct ArticleSink {
    state: Mutex<SinkState>,
}

impl Default for ArticleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleSink {
    /// Creates an open, empty sink
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SinkState::Open(Vec::new())),
        }
    }

    /// Adds a record
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The record will be part of the ranking
    /// * `Err(NewsrankError::SinkClosed)` - The sink was already closed; the record is dropped
    pub fn publish(&self, article: Article) -> Result<(), NewsrankError> {
        match &mut *self.lock() {
            SinkState::Open(records) => {
                tracing::debug!("Collected {} ({} likes)", article.url, article.likes);
                records.push(article);
                Ok(())
            }
            SinkState::Closed => Err(NewsrankError::SinkClosed { url: article.url }),
        }
    }

    /// Closes the sink and takes its records
    ///
    /// Returns `None` if the sink was already closed.
    pub fn close(&self) -> Option<Vec<Article>> {
        match std::mem::replace(&mut *self.lock(), SinkState::Closed) {
            SinkState::Open(records) => Some(records),
            SinkState::Closed => None,
        }
    }

    /// Returns the number of records collected so far (0 once closed)
    pub fn len(&self) -> usize {
        match &*self.lock() {
            SinkState::Open(records) => records.len(),
            SinkState::Closed => 0,
        }
    }

    /// Returns true if no record is waiting in the sink
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true once the sink has been closed
    pub fn is_closed(&self) -> bool {
        matches!(&*self.lock(), SinkState::Closed)
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
