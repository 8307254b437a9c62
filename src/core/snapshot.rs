//! Externally observable actor state.

use super::context::Context;
use super::state::{StateValue, Status};
use serde::{Deserialize, Serialize};

/// The `(value, context, status)` triple describing an actor at one point
/// in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    value: StateValue,
    context: Context,
    status: Status,
}

impl Snapshot {
    pub fn new(value: StateValue, context: Context, status: Status) -> Self {
        Self {
            value,
            context,
            status,
        }
    }

    pub fn value(&self) -> &StateValue {
        &self.value
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the current state value equals `value`.
    pub fn matches(&self, value: &str) -> bool {
        self.value == value
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn replace(&mut self, value: StateValue, context: Context) {
        self.value = value;
        self.context = context;
    }

    pub(crate) fn set_context(&mut self, context: Context) {
        self.context = context;
    }
}
