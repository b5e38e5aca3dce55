use serde::{Serialize, Deserialize};

mod action;
mod navigator;
mod subscriber;
mod trigger;
mod window;

pub use action::{resolve_last_action, ActivationSignals, NavAction, Signal};
pub use navigator::{
    Navigator, NavigatorConfig, NavigatorState, RecordCount, DEFAULT_LABELS, DEFAULT_PAGE_SIZE,
};
pub use subscriber::WindowSubscriber;
pub use trigger::{trigger_id, TriggerDescriptor, INITIAL_SIGNALS};
pub use window::PageWindow;

/// Direction a navigation control moves through the record set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NavDirection {
    Backward,
    Forward,
}

/// Context passed to subscribers after a window change is committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowChange {
    /// The resolved action, `None` when no recognized control fired
    pub action: Option<NavAction>,
    pub previous: PageWindow,
    pub current: PageWindow,
    /// Whether the query fingerprint changed and forced the first page
    pub fingerprint_reset: bool,
}
