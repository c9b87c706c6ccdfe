use crate::error::Error;
use crate::records::RecordSet;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;

/// The currently served [`RecordSet`], shared read-only by every request handler.
///
/// Readers take a cheap [`snapshot`][SharedRecords::snapshot] and work against it for the whole
/// lookup. Reloads build a complete new set and publish it in one atomic swap.
#[derive(Debug)]
pub struct SharedRecords {
    current: ArcSwap<RecordSet>,
}

impl SharedRecords {
    #[must_use]
    pub fn new(records: RecordSet) -> Self {
        SharedRecords {
            current: ArcSwap::from_pointee(records),
        }
    }

    /// The set being served right now.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RecordSet> {
        self.current.load_full()
    }

    /// Publish `records` in place of the current set.
    pub fn replace(&self, records: RecordSet) {
        self.current.store(Arc::new(records));
    }

    /// Load a new set from `p` and publish it, returning the number of records now served.
    ///
    /// # Errors
    ///
    /// Returns the [`RecordSet::try_from_file`] error. The previously published set keeps
    /// being served in that case.
    pub async fn reload_from(&self, p: impl AsRef<Path>) -> Result<usize, Error> {
        let records = RecordSet::try_from_file(p).await?;
        let count = records.len();
        self.replace(records);
        Ok(count)
    }
}

impl Default for SharedRecords {
    fn default() -> Self {
        SharedRecords::new(RecordSet::default())
    }
}
