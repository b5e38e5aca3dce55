//! Window subscriber trait

use super::WindowChange;

/// Trait for components that need to respond to page window changes
pub trait WindowSubscriber: Send + Sync {
    /// Called after a navigator commits a new window
    fn on_window_change(&self, change: &WindowChange);
}
