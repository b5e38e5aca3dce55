//! In-memory names table held as a single Arrow record batch

use std::path::Path;

use arrow::array::BooleanArray;
use arrow::compute::filter_record_batch;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use recnav_core::{NavAction, Navigator, PageWindow, RecordCount};

use super::{Page, RecordSource};
use crate::bootstrap::read_names;
use crate::records::{records_to_batch, sort_records, NameColumns, NameFilter, NameRecord};
use crate::DataError;

/// Names table kept in memory, sorted by births then name
pub struct FrameSource {
    name: String,
    batch: RecordBatch,
}

impl FrameSource {
    /// Load a names file into memory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let records = read_names(path.as_ref())?;
        let name = path
            .as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("names")
            .to_string();
        Self::from_records(name, records)
    }

    pub fn from_records(
        name: impl Into<String>,
        mut records: Vec<NameRecord>,
    ) -> Result<Self, DataError> {
        sort_records(&mut records);
        Ok(Self {
            name: name.into(),
            batch: records_to_batch(&records)?,
        })
    }

    /// Total number of records held
    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// All records matching `filter`, in table order
    pub fn filtered(&self, filter: &NameFilter) -> Result<RecordBatch, DataError> {
        let columns = NameColumns::from_batch(&self.batch)?;

        let mask = (0..self.batch.num_rows())
            .map(|row| {
                let gender = columns.gender(row)?;
                Ok(filter.matches_parts(columns.names.value(row), gender))
            })
            .collect::<Result<Vec<bool>, DataError>>()?;

        Ok(filter_record_batch(&self.batch, &BooleanArray::from(mask))?)
    }
}

fn slice(batch: &RecordBatch, window: PageWindow) -> RecordBatch {
    let range = window.range_within(batch.num_rows());
    batch.slice(range.start, range.len())
}

impl RecordSource for FrameSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    fn count(&self, filter: &NameFilter) -> Result<usize, DataError> {
        Ok(self.filtered(filter)?.num_rows())
    }

    fn fetch(&self, filter: &NameFilter, window: PageWindow) -> Result<RecordBatch, DataError> {
        Ok(slice(&self.filtered(filter)?, window))
    }

    /// Filters once and hands the navigator the known count
    fn page(
        &self,
        navigator: &mut Navigator<NameFilter>,
        action: Option<NavAction>,
        filter: &NameFilter,
        page_size: Option<usize>,
    ) -> Result<Page, DataError> {
        let filtered = self.filtered(filter)?;
        let total = filtered.num_rows();

        let window =
            navigator.compute_window(action, filter.clone(), RecordCount::known(total), page_size)?;
        tracing::debug!(source = %self.name, %window, total, "Sliced page");

        Ok(Page {
            window,
            batch: slice(&filtered, window),
            total: Some(total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Gender;
    use recnav_core::NavigatorConfig;

    fn source() -> FrameSource {
        let records = (0..25)
            .map(|i| {
                let gender = if i % 2 == 0 { Gender::Female } else { Gender::Male };
                NameRecord::new(format!("Name{:02}", i), gender, 1000 - i)
            })
            .collect();
        FrameSource::from_records("test", records).unwrap()
    }

    #[test]
    fn test_filtered_by_gender_and_search() {
        let source = source();
        assert_eq!(source.len(), 25);
        assert_eq!(source.count(&NameFilter::all().with_genders([Gender::Female])).unwrap(), 13);
        assert_eq!(source.count(&NameFilter::all().with_search("name1")).unwrap(), 10);
    }

    #[test]
    fn test_fetch_past_end_is_empty() {
        let source = source();
        let batch = source.fetch(&NameFilter::all(), PageWindow::new(10, 30)).unwrap();
        assert_eq!(batch.num_rows(), 0);

        let batch = source.fetch(&NameFilter::all(), PageWindow::new(10, 20)).unwrap();
        assert_eq!(batch.num_rows(), 5);
    }

    #[test]
    fn test_page_walk() {
        let source = source();
        let mut nav = Navigator::new(NavigatorConfig::new("names")).unwrap();
        let filter = NameFilter::all();

        let page = source.page(&mut nav, Some(NavAction::First), &filter, None).unwrap();
        assert_eq!(page.total, Some(25));
        assert_eq!(page.records().unwrap()[0].name, "Name00");

        let page = source.page(&mut nav, Some(NavAction::Last), &filter, None).unwrap();
        assert_eq!(page.window, PageWindow::new(10, 15));
        let names: Vec<_> = page.records().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names.first().map(String::as_str), Some("Name15"));
        assert_eq!(names.len(), 10);
    }
}
