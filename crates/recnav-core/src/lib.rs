//! Core record navigation for paged browsing
//!
//! This crate provides the navigator state machine that turns first /
//! previous / next / last actions into page windows, plus per-session
//! ownership of navigators.

pub mod error;
pub mod navigation;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use error::{ComputeError, NavigatorError};
pub use navigation::{
    ActivationSignals, NavAction, NavDirection, Navigator, NavigatorConfig,
    PageWindow, RecordCount, TriggerDescriptor, WindowChange, WindowSubscriber,
};
pub use session::{NavigatorRegistry, SessionId};
pub use settings::NavigatorSettings;
