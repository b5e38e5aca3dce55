//! Navigation actions and last-activated signal resolution

use serde::{Serialize, Deserialize};
use std::str::FromStr;

use crate::error::NavigatorError;

/// The four directional navigation actions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
}

impl NavAction {
    /// All actions in trigger order, which is also the tie-break priority
    pub const ALL: [NavAction; 4] = [
        NavAction::First,
        NavAction::Previous,
        NavAction::Next,
        NavAction::Last,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NavAction::First => "first",
            NavAction::Previous => "previous",
            NavAction::Next => "next",
            NavAction::Last => "last",
        }
    }

    /// Icon name of the control bound to this action
    pub fn icon(&self) -> &'static str {
        match self {
            NavAction::First => "fast-backward",
            NavAction::Previous => "step-backward",
            NavAction::Next => "step-forward",
            NavAction::Last => "fast-forward",
        }
    }

    /// Position of the action in trigger order
    pub fn index(&self) -> usize {
        match self {
            NavAction::First => 0,
            NavAction::Previous => 1,
            NavAction::Next => 2,
            NavAction::Last => 3,
        }
    }
}

impl std::fmt::Display for NavAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavAction {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "f" | "fast-backward" => Ok(NavAction::First),
            "previous" | "prev" | "p" | "step-backward" => Ok(NavAction::Previous),
            "next" | "n" | "step-forward" => Ok(NavAction::Next),
            "last" | "l" | "fast-forward" => Ok(NavAction::Last),
            other => Err(NavigatorError::UnknownAction(other.to_string())),
        }
    }
}

/// Last-activated signal of one control
///
/// A click counter or timestamp; `None` means the control was never
/// activated and orders below every reported value.
pub type Signal = Option<i64>;

/// Per-control activation signals as reported by a UI layer
///
/// Only needed by UIs that can report nothing better than per-control
/// counters or timestamps. UIs that deliver a discrete [`NavAction`] should
/// pass it to the navigator directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivationSignals {
    pub first: Signal,
    pub previous: Signal,
    pub next: Signal,
    pub last: Signal,
    /// Signal of some unrelated trigger sharing the same callback
    pub other: Signal,
}

impl ActivationSignals {
    pub fn new(first: Signal, previous: Signal, next: Signal, last: Signal) -> Self {
        Self {
            first,
            previous,
            next,
            last,
            other: None,
        }
    }

    pub fn with_other(mut self, other: Signal) -> Self {
        self.other = other;
        self
    }

    /// Build signals from a sequence reported in trigger order.
    ///
    /// Accepts four values, or five when the last one is the unrelated
    /// trigger. Returns `None` for any other length.
    pub fn from_slice(values: &[Signal]) -> Option<Self> {
        match values {
            [first, previous, next, last] => Some(Self::new(*first, *previous, *next, *last)),
            [first, previous, next, last, other] => {
                Some(Self::new(*first, *previous, *next, *last).with_other(*other))
            }
            _ => None,
        }
    }

    fn get(&self, action: NavAction) -> Signal {
        match action {
            NavAction::First => self.first,
            NavAction::Previous => self.previous,
            NavAction::Next => self.next,
            NavAction::Last => self.last,
        }
    }

    /// Resolve which control fired most recently.
    ///
    /// Ties at the maximum go to the earliest action in trigger order
    /// (first, previous, next, last). That order only mirrors evaluation
    /// order and carries no meaning; it matters for exact ties, which
    /// normally only happen before anything was clicked.
    ///
    /// Returns `None` when the unrelated trigger is at least as recent as
    /// every navigation control.
    pub fn resolve(&self) -> Option<NavAction> {
        let mut best = NavAction::First;
        for action in NavAction::ALL.into_iter().skip(1) {
            if self.get(action) > self.get(best) {
                best = action;
            }
        }

        if self.other.is_some() && self.other >= self.get(best) {
            return None;
        }

        Some(best)
    }
}

/// Free-standing form of [`ActivationSignals::resolve`]
pub fn resolve_last_action(
    first: Signal,
    previous: Signal,
    next: Signal,
    last: Signal,
    other: Signal,
) -> Option<NavAction> {
    ActivationSignals::new(first, previous, next, last)
        .with_other(other)
        .resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_maximum_wins() {
        for (idx, expected) in NavAction::ALL.into_iter().enumerate() {
            let mut values = [Some(1), Some(2), Some(3), Some(4)];
            values[idx] = Some(100);
            let signals = ActivationSignals::from_slice(&values).unwrap();
            assert_eq!(signals.resolve(), Some(expected));
        }
    }

    #[test]
    fn test_ties_follow_trigger_order() {
        let signals = ActivationSignals::new(None, Some(5), Some(5), Some(5));
        assert_eq!(signals.resolve(), Some(NavAction::Previous));

        let signals = ActivationSignals::new(Some(3), Some(1), Some(3), Some(3));
        assert_eq!(signals.resolve(), Some(NavAction::First));

        let signals = ActivationSignals::new(None, None, Some(9), Some(9));
        assert_eq!(signals.resolve(), Some(NavAction::Next));
    }

    #[test]
    fn test_never_activated_orders_below_any_value() {
        let signals = ActivationSignals::new(None, None, None, Some(-50));
        assert_eq!(signals.resolve(), Some(NavAction::Last));
    }

    #[test]
    fn test_initial_signals_select_first() {
        let signals = ActivationSignals::new(Some(0), None, None, None);
        assert_eq!(signals.resolve(), Some(NavAction::First));
    }

    #[test]
    fn test_other_trigger_at_or_above_maximum_resolves_none() {
        let signals = ActivationSignals::new(Some(1), Some(2), Some(3), Some(4));
        assert_eq!(signals.with_other(Some(4)).resolve(), None);
        assert_eq!(signals.with_other(Some(10)).resolve(), None);
        assert_eq!(signals.with_other(Some(3)).resolve(), Some(NavAction::Last));
    }

    #[test]
    fn test_from_slice_with_other() {
        let signals = ActivationSignals::from_slice(&[Some(1), None, None, None, Some(7)]).unwrap();
        assert_eq!(signals.other, Some(7));
        assert_eq!(signals.resolve(), None);
        assert!(ActivationSignals::from_slice(&[Some(1), None]).is_none());
    }

    #[test]
    fn test_free_function_matches_method() {
        assert_eq!(
            resolve_last_action(Some(1), Some(8), Some(2), None, None),
            Some(NavAction::Previous)
        );
    }

    #[test]
    fn test_parse_action_names() {
        assert_eq!("next".parse::<NavAction>().unwrap(), NavAction::Next);
        assert_eq!("fast-backward".parse::<NavAction>().unwrap(), NavAction::First);
        assert_eq!(" L ".parse::<NavAction>().unwrap(), NavAction::Last);
        assert!(matches!(
            "sideways".parse::<NavAction>(),
            Err(NavigatorError::UnknownAction(_))
        ));
    }
}
