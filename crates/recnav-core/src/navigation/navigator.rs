//! Navigator implementation

use std::sync::{Arc, Weak};

use super::{NavAction, PageWindow, TriggerDescriptor, WindowChange, WindowSubscriber};
use crate::error::{ComputeError, NavigatorError, Result};

/// Records per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Labels of the first, previous, next and last controls
pub const DEFAULT_LABELS: [&str; 4] = ["first", "previous", "next", "last"];

/// Immutable navigator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    name: String,
    page_size: usize,
    ascending: bool,
    labels: Option<[String; 4]>,
}

impl NavigatorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page_size: DEFAULT_PAGE_SIZE,
            ascending: true,
            labels: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Records shown last to first when `false`; only the default labels change
    pub fn with_ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    /// Explicit labels, in first, previous, next, last order
    pub fn with_labels<S: Into<String>>(mut self, labels: [S; 4]) -> Self {
        self.labels = Some(labels.map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn ascending(&self) -> bool {
        self.ascending
    }

    /// Resolved labels. Explicit labels are used as given, the defaults are
    /// reversed for descending navigators.
    pub fn labels(&self) -> [String; 4] {
        match &self.labels {
            Some(labels) => labels.clone(),
            None => {
                let mut labels = DEFAULT_LABELS.map(String::from);
                if !self.ascending {
                    labels.reverse();
                }
                labels
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_page_size(self.page_size)
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::new("records")
    }
}

pub(crate) fn validate_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        tracing::warn!("Rejected page size {}", page_size);
        return Err(NavigatorError::InvalidPageSize(page_size));
    }
    Ok(())
}

/// Size of the record set a window is computed against
///
/// `Deferred` holds a possibly expensive counter (a full scan, a
/// `SELECT COUNT(*)`). It is only invoked for [`NavAction::Last`].
pub enum RecordCount<F> {
    Known(usize),
    Deferred(F),
}

impl RecordCount<fn() -> std::result::Result<usize, std::convert::Infallible>> {
    /// A count that is already known
    pub fn known(count: usize) -> Self {
        RecordCount::Known(count)
    }
}

impl<F> RecordCount<F> {
    pub fn deferred(counter: F) -> Self {
        RecordCount::Deferred(counter)
    }

    fn resolve<E>(self) -> std::result::Result<usize, E>
    where
        F: FnOnce() -> std::result::Result<usize, E>,
    {
        match self {
            RecordCount::Known(count) => Ok(count),
            RecordCount::Deferred(counter) => counter(),
        }
    }
}

impl<F> From<usize> for RecordCount<F> {
    fn from(count: usize) -> Self {
        RecordCount::Known(count)
    }
}

/// Mutable position state, owned by exactly one navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState<Q> {
    offset: usize,
    fingerprint: Option<Q>,
}

impl<Q> NavigatorState<Q> {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn fingerprint(&self) -> Option<&Q> {
        self.fingerprint.as_ref()
    }
}

impl<Q> Default for NavigatorState<Q> {
    fn default() -> Self {
        Self {
            offset: 0,
            fingerprint: None,
        }
    }
}

/// Offset update selected for one call, before the record count is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Reset { fingerprint_changed: bool },
    Back,
    Forward,
    ToEnd,
}

/// Pagination state machine for one browsing session
///
/// `Q` is the query fingerprint: a snapshot of whatever defines the current
/// record set (search text, filters). It is only ever compared for equality.
pub struct Navigator<Q> {
    config: NavigatorConfig,
    state: NavigatorState<Q>,
    subscribers: Vec<Weak<dyn WindowSubscriber>>,
}

impl<Q: PartialEq> Navigator<Q> {
    /// Create a new navigator, rejecting a zero page size
    pub fn new(config: NavigatorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            state: NavigatorState::default(),
            subscribers: Vec::new(),
        })
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn state(&self) -> &NavigatorState<Q> {
        &self.state
    }

    pub fn offset(&self) -> usize {
        self.state.offset
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn fingerprint(&self) -> Option<&Q> {
        self.state.fingerprint.as_ref()
    }

    /// Descriptors of the four controls, in first, previous, next, last order
    pub fn triggers(&self) -> [TriggerDescriptor; 4] {
        let labels = self.config.labels();
        NavAction::ALL.map(|action| {
            TriggerDescriptor::new(action, &self.config.name, &labels[action.index()])
        })
    }

    /// Return to the initial state: first page, no fingerprint
    pub fn reset(&mut self) {
        self.state = NavigatorState::default();
    }

    /// Add a subscriber
    pub fn add_subscriber(&mut self, subscriber: Arc<dyn WindowSubscriber>) {
        self.subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Compute the page window for `action` and commit it.
    ///
    /// The first page is selected when `action` is `First` or `None`, or when
    /// `fingerprint` differs from the one stored by the previous call. The
    /// record count is resolved only for `Last`; if that fails, the error is
    /// returned and the navigator is left untouched.
    pub fn compute_window<F, E>(
        &mut self,
        action: Option<NavAction>,
        fingerprint: Q,
        record_count: RecordCount<F>,
        page_size: Option<usize>,
    ) -> std::result::Result<PageWindow, ComputeError<E>>
    where
        F: FnOnce() -> std::result::Result<usize, E>,
    {
        let limit = self.effective_page_size(page_size)?;
        let transition = self.transition(action, &fingerprint);

        let offset = match transition {
            Transition::ToEnd => {
                let count = record_count.resolve().map_err(ComputeError::Count)?;
                count.saturating_sub(limit)
            }
            other => self.step_offset(other, limit),
        };

        Ok(self.commit(action, transition, fingerprint, limit, offset))
    }

    /// Compute the window against a record count that is already known
    pub fn window_with_count(
        &mut self,
        action: Option<NavAction>,
        fingerprint: Q,
        record_count: usize,
    ) -> Result<PageWindow> {
        self.compute_window(action, fingerprint, RecordCount::known(record_count), None)
            .map_err(|e| match e {
                ComputeError::Navigator(e) => e,
                ComputeError::Count(never) => match never {},
            })
    }

    fn effective_page_size(&self, page_size: Option<usize>) -> Result<usize> {
        match page_size {
            Some(size) => {
                validate_page_size(size)?;
                Ok(size)
            }
            None => Ok(self.config.page_size),
        }
    }

    fn transition(&self, action: Option<NavAction>, fingerprint: &Q) -> Transition {
        let fingerprint_changed = self.state.fingerprint.as_ref() != Some(fingerprint);

        match action {
            _ if fingerprint_changed => Transition::Reset { fingerprint_changed },
            None | Some(NavAction::First) => Transition::Reset { fingerprint_changed },
            Some(NavAction::Previous) => Transition::Back,
            Some(NavAction::Next) => Transition::Forward,
            Some(NavAction::Last) => Transition::ToEnd,
        }
    }

    fn step_offset(&self, transition: Transition, limit: usize) -> usize {
        match transition {
            Transition::Reset { .. } => 0,
            Transition::Back => self.state.offset.saturating_sub(limit),
            Transition::Forward => self.state.offset.saturating_add(limit),
            Transition::ToEnd => self.state.offset,
        }
    }

    fn commit(
        &mut self,
        action: Option<NavAction>,
        transition: Transition,
        fingerprint: Q,
        limit: usize,
        offset: usize,
    ) -> PageWindow {
        let previous = PageWindow::new(limit, self.state.offset);
        let current = PageWindow::new(limit, offset);
        let fingerprint_reset = matches!(
            transition,
            Transition::Reset { fingerprint_changed: true }
        );

        self.state.offset = offset;
        self.state.fingerprint = Some(fingerprint);

        tracing::debug!(
            navigator = %self.config.name,
            action = ?action,
            fingerprint_reset,
            limit,
            offset,
            "Computed page window"
        );

        self.notify_subscribers(WindowChange {
            action,
            previous,
            current,
            fingerprint_reset,
        });

        current
    }

    /// Notify all subscribers of a window change
    fn notify_subscribers(&mut self, change: WindowChange) {
        // Remove any dead weak references
        self.subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in self.subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_window_change(&change);
            }
        }
    }
}

impl<Q: std::fmt::Debug> std::fmt::Debug for Navigator<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
