//! State values and actor status.
//!
//! Both the machine's finite state and the actor's own lifecycle status are
//! modelled as states: they share the `State` trait so history tracking and
//! diagnostics can treat them uniformly.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Debug};

/// Trait for anything that names a position in a state machine.
///
/// All methods are pure - no side effects.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, StateValue, Status};
///
/// let value = StateValue::from("locked");
/// assert_eq!(value.name(), "locked");
/// assert!(!value.is_final());
///
/// assert!(Status::Error.is_final());
/// assert!(Status::Error.is_error());
/// assert!(!Status::Stopped.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Identifier of one of the states declared by a machine definition.
///
/// Compared structurally; an unknown value is simply a value no definition
/// recognises.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateValue(String);

impl StateValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl State for StateValue {
    fn name(&self) -> &str {
        &self.0
    }
}

impl Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for StateValue {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StateValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Lifecycle status of an actor.
///
/// `Active` is the only status in which events are accepted. `Done` is
/// reserved for final-state support and is never produced by the runtime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Done,
    Stopped,
    Error,
}

impl Status {
    /// Whether events sent in this status are processed.
    pub fn accepts_events(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl State for Status {
    fn name(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Done => "done",
            Self::Stopped => "stopped",
            Self::Error => "error",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_value_name_returns_inner_string() {
        let value = StateValue::from("inactive");
        assert_eq!(value.name(), "inactive");
        assert_eq!(value.as_str(), "inactive");
        assert_eq!(value.to_string(), "inactive");
    }

    #[test]
    fn state_value_compares_structurally() {
        let a = StateValue::new("active");
        let b = StateValue::from(String::from("active"));
        let c = StateValue::from("inactive");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a == "active");
    }

    #[test]
    fn status_names_are_lowercase() {
        assert_eq!(Status::Active.name(), "active");
        assert_eq!(Status::Done.name(), "done");
        assert_eq!(Status::Stopped.name(), "stopped");
        assert_eq!(Status::Error.name(), "error");
    }

    #[test]
    fn only_active_accepts_events() {
        assert!(Status::Active.accepts_events());
        assert!(!Status::Done.accepts_events());
        assert!(!Status::Stopped.accepts_events());
        assert!(!Status::Error.accepts_events());
    }

    #[test]
    fn is_final_identifies_terminal_statuses() {
        assert!(!Status::Active.is_final());
        assert!(!Status::Stopped.is_final());
        assert!(Status::Done.is_final());
        assert!(Status::Error.is_final());
        assert!(Status::Error.is_error());
        assert!(!Status::Done.is_error());
    }

    #[test]
    fn state_value_serializes_as_plain_string() {
        let value = StateValue::from("locked");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"locked\"");

        let deserialized: StateValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, deserialized);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Stopped).unwrap();
        assert_eq!(json, "\"stopped\"");
    }
}
