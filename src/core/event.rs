//! Events delivered to actors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type of the synthetic event handed to the initial state's entry actions.
pub const INIT_EVENT: &str = "statecraft.init";

/// A tagged record: a mandatory `type` discriminant plus arbitrary payload.
///
/// Events compare structurally (type and payload), never by identity.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Event;
/// use serde_json::json;
///
/// let event = Event::new("DEPOSIT").with("amount", json!(25));
/// assert_eq!(event.event_type(), "DEPOSIT");
/// assert_eq!(event.get("amount"), Some(&json!(25)));
/// assert_eq!(event, Event::new("DEPOSIT").with("amount", json!(25)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            payload: Map::new(),
        }
    }

    /// Add a payload field, replacing any previous value for `key`.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    pub(crate) fn init() -> Self {
        Self::new(INIT_EVENT)
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

impl From<&str> for Event {
    fn from(event_type: &str) -> Self {
        Self::new(event_type)
    }
}

impl From<String> for Event {
    fn from(event_type: String) -> Self {
        Self::new(event_type)
    }
}
