//! Descriptors for the controls a hosting UI renders

use serde::{Serialize, Deserialize};

use super::{NavAction, NavDirection, Signal};

/// Signal each control reports before it was ever activated.
///
/// The first-page control starts ahead of the others so that the very first
/// resolution selects the first page.
pub const INITIAL_SIGNALS: [Signal; 4] = [Some(0), None, None, None];

/// Everything a UI layer needs to create one navigation control and wire its
/// activation signal back to the navigator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerDescriptor {
    pub action: NavAction,
    /// Stable element id, unique per navigator name
    pub id: String,
    /// Icon name, e.g. `step-forward`
    pub icon: String,
    /// Tooltip or label text
    pub label: String,
    pub direction: NavDirection,
    pub initial_signal: Signal,
}

impl TriggerDescriptor {
    pub(crate) fn new(action: NavAction, navigator_name: &str, label: &str) -> Self {
        let direction = match action {
            NavAction::First | NavAction::Previous => NavDirection::Backward,
            NavAction::Next | NavAction::Last => NavDirection::Forward,
        };

        Self {
            action,
            id: trigger_id(action, navigator_name),
            icon: action.icon().to_string(),
            label: label.to_string(),
            direction,
            initial_signal: INITIAL_SIGNALS[action.index()],
        }
    }
}

/// Element id of the control for `action` on the navigator named `name`
pub fn trigger_id(action: NavAction, name: &str) -> String {
    format!("btn-{}-{}", action.icon(), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_ids() {
        assert_eq!(trigger_id(NavAction::First, "names"), "btn-fast-backward-names");
        assert_eq!(trigger_id(NavAction::Last, "names"), "btn-fast-forward-names");
    }

    #[test]
    fn test_descriptor_direction_and_initial_signal() {
        let first = TriggerDescriptor::new(NavAction::First, "names", "first");
        assert_eq!(first.direction, NavDirection::Backward);
        assert_eq!(first.initial_signal, Some(0));

        let next = TriggerDescriptor::new(NavAction::Next, "names", "next");
        assert_eq!(next.direction, NavDirection::Forward);
        assert_eq!(next.initial_signal, None);
        assert_eq!(next.icon, "step-forward");
    }
}
