pub mod frame_source;
pub mod sqlite_source;

pub use frame_source::FrameSource;
pub use sqlite_source::SqliteSource;

use std::cell::Cell;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use recnav_core::{NavAction, Navigator, PageWindow, RecordCount};

use crate::records::{batch_to_records, NameFilter, NameRecord};
use crate::DataError;

/// One page of records together with the window that selected it
#[derive(Debug, Clone)]
pub struct Page {
    pub window: PageWindow,
    pub batch: RecordBatch,
    /// Size of the filtered record set, when it was known or counted
    pub total: Option<usize>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn records(&self) -> Result<Vec<NameRecord>, DataError> {
        batch_to_records(&self.batch)
    }
}

/// Backend that serves pages of name records
pub trait RecordSource: Send + Sync {
    /// Get the source name/path
    fn source_name(&self) -> &str;

    /// Get the schema of the returned pages
    fn schema(&self) -> SchemaRef;

    /// Number of records matching `filter`. May require a full scan.
    fn count(&self, filter: &NameFilter) -> Result<usize, DataError>;

    /// Records matching `filter` inside `window`
    fn fetch(&self, filter: &NameFilter, window: PageWindow) -> Result<RecordBatch, DataError>;

    /// Move `navigator` according to `action` and fetch the resulting page.
    ///
    /// The default counts lazily, so [`count`](Self::count) only runs for a
    /// jump to the last page. The page carries the total only when it ran.
    fn page(
        &self,
        navigator: &mut Navigator<NameFilter>,
        action: Option<NavAction>,
        filter: &NameFilter,
        page_size: Option<usize>,
    ) -> Result<Page, DataError> {
        let counted = Cell::new(None);
        let window = navigator.compute_window(
            action,
            filter.clone(),
            RecordCount::deferred(|| {
                let count = self.count(filter)?;
                counted.set(Some(count));
                Ok::<_, DataError>(count)
            }),
            page_size,
        )?;
        let batch = self.fetch(filter, window)?;

        Ok(Page {
            window,
            batch,
            total: counted.get(),
        })
    }
}
