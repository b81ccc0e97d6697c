// Explicit memoization table: (source, load options) -> Dataset.
//
// A source is fetched at most once per key until it is invalidated. Callers
// get a shared Arc to the same immutable Dataset on every hit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use super::fetch::SourceFetcher;
use super::loader::{self, LoadOptions};
use super::models::Dataset;
use super::source::DataSource;
use crate::error::LoadError;

type CacheKey = (DataSource, LoadOptions);

/// Process-wide dataset cache with explicit invalidation.
pub struct DatasetCache {
    fetcher: Arc<dyn SourceFetcher>,
    entries: Mutex<HashMap<CacheKey, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new(fetcher: Arc<dyn SourceFetcher>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached Dataset for this key, loading it on a miss.
    ///
    /// A failed load caches nothing; the next call tries again.
    pub async fn get_or_load(
        &self,
        source: &DataSource,
        options: LoadOptions,
    ) -> Result<Arc<Dataset>, LoadError> {
        let key = (source.clone(), options);

        if let Some(hit) = self.lookup(&key) {
            debug!(source = %source, "Dataset cache hit");
            return Ok(hit);
        }

        info!(source = %source, "Dataset cache miss, loading");
        let dataset = Arc::new(loader::load(self.fetcher.as_ref(), source, options).await?);

        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        // Single-session use means no competing loader, but keep the first
        // stored value if one appeared so every caller shares one Dataset.
        let stored = entries.entry(key).or_insert(dataset);
        Ok(Arc::clone(stored))
    }

    /// Drop every cached entry for a source, whatever options it was loaded with.
    /// Returns true if anything was removed.
    pub fn invalidate(&self, source: &DataSource) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        let before = entries.len();
        entries.retain(|(s, _), _| s != source);
        let removed = entries.len() != before;
        if removed {
            info!(source = %source, "Dataset cache invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &CacheKey) -> Option<Arc<Dataset>> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(key)
            .cloned()
    }
}
