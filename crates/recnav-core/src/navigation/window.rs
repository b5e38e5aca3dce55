use serde::{Serialize, Deserialize};

/// A page of the record set, expressed the way SQL does it
///
/// Covers the half-open range `[offset, offset + limit)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageWindow {
    /// Number of records on the page
    pub limit: usize,
    /// Index of the first record on the page
    pub offset: usize,
}

impl PageWindow {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// One past the last record index covered by this window
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }

    /// Clip the window against a record set of `len` records.
    ///
    /// Returns an empty range when the window starts past the end.
    pub fn range_within(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = self.end().min(len);
        start..end
    }

    /// Number of records the window actually covers in a set of `len` records
    pub fn len_within(&self, len: usize) -> usize {
        self.range_within(len).len()
    }

    /// `(limit, offset)` pair
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.limit, self.offset)
    }
}

impl From<PageWindow> for (usize, usize) {
    fn from(window: PageWindow) -> Self {
        window.as_tuple()
    }
}

impl std::fmt::Display for PageWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LIMIT {} OFFSET {}", self.limit, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_within_clips_to_len() {
        let window = PageWindow::new(10, 20);
        assert_eq!(window.range_within(25), 20..25);
        assert_eq!(window.len_within(25), 5);
    }

    #[test]
    fn test_range_past_end_is_empty() {
        let window = PageWindow::new(10, 40);
        assert!(window.range_within(25).is_empty());
    }

    #[test]
    fn test_display_as_sql() {
        assert_eq!(PageWindow::new(10, 5).to_string(), "LIMIT 10 OFFSET 5");
    }
}
