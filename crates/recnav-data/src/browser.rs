//! A navigator bound to one record source

use recnav_core::{ActivationSignals, NavAction, Navigator, NavigatorConfig, TriggerDescriptor};

use crate::records::NameFilter;
use crate::sources::{Page, RecordSource};
use crate::DataError;

/// Pages through one record source for one browsing session
pub struct RecordBrowser<S> {
    navigator: Navigator<NameFilter>,
    source: S,
}

impl<S: RecordSource> RecordBrowser<S> {
    pub fn new(config: NavigatorConfig, source: S) -> Result<Self, DataError> {
        Ok(Self {
            navigator: Navigator::new(config)?,
            source,
        })
    }

    /// Apply an explicit action and fetch the resulting page
    pub fn page(
        &mut self,
        action: Option<NavAction>,
        filter: &NameFilter,
    ) -> Result<Page, DataError> {
        self.source.page(&mut self.navigator, action, filter, None)
    }

    /// Like [`page`](Self::page), with a one-off page size
    pub fn page_with_size(
        &mut self,
        action: Option<NavAction>,
        filter: &NameFilter,
        page_size: usize,
    ) -> Result<Page, DataError> {
        self.source.page(&mut self.navigator, action, filter, Some(page_size))
    }

    /// Resolve the most recently activated control, then fetch the page
    pub fn page_from_signals(
        &mut self,
        signals: &ActivationSignals,
        filter: &NameFilter,
    ) -> Result<Page, DataError> {
        self.page(signals.resolve(), filter)
    }

    pub fn triggers(&self) -> [TriggerDescriptor; 4] {
        self.navigator.triggers()
    }

    pub fn navigator(&self) -> &Navigator<NameFilter> {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator<NameFilter> {
        &mut self.navigator
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Gender, NameRecord};
    use crate::sources::FrameSource;
    use recnav_core::{NavigatorError, PageWindow};

    fn browser() -> RecordBrowser<FrameSource> {
        let records = (0..25)
            .map(|i| NameRecord::new(format!("Name{:02}", i), Gender::Female, 100 - i))
            .collect();
        let source = FrameSource::from_records("test", records).unwrap();
        RecordBrowser::new(NavigatorConfig::new("names"), source).unwrap()
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let source = FrameSource::from_records("test", Vec::new()).unwrap();
        let result = RecordBrowser::new(NavigatorConfig::new("names").with_page_size(0), source);
        assert!(matches!(result, Err(DataError::Navigator(NavigatorError::InvalidPageSize(0)))));
    }

    #[test]
    fn test_page_from_signals() {
        let mut browser = browser();
        let filter = NameFilter::all();

        let mut window = |signals: ActivationSignals| {
            browser.page_from_signals(&signals, &filter).unwrap().window
        };

        let signals = ActivationSignals::new(Some(0), None, None, None);
        assert_eq!(window(signals), PageWindow::new(10, 0));

        let signals = ActivationSignals::new(Some(0), None, Some(1), None);
        assert_eq!(window(signals), PageWindow::new(10, 10));

        let signals = ActivationSignals::new(Some(0), None, Some(1), None).with_other(Some(2));
        assert_eq!(window(signals), PageWindow::new(10, 0));
    }

    #[test]
    fn test_page_with_size_override() {
        let mut browser = browser();
        let filter = NameFilter::all();
        browser.page(Some(NavAction::First), &filter).unwrap();

        let page = browser.page_with_size(Some(NavAction::Next), &filter, 4).unwrap();
        assert_eq!(page.window, PageWindow::new(4, 4));
        assert_eq!(page.len(), 4);
    }

    #[test]
    fn test_search_change_returns_to_first_page() {
        let mut browser = browser();
        let filter = NameFilter::all();
        browser.page(Some(NavAction::First), &filter).unwrap();
        browser.page(Some(NavAction::Next), &filter).unwrap();

        let narrowed = filter.clone().with_search("name2");
        let page = browser.page(Some(NavAction::Next), &narrowed).unwrap();
        assert_eq!(page.window.offset, 0);
        assert_eq!(page.total, Some(5));
        assert_eq!(browser.navigator().fingerprint(), Some(&narrowed));
    }
}
