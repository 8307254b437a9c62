//! Run-time action errors.

use std::any::Any;
use thiserror::Error;

/// Errors raised while executing a single action.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    /// The action body reported a failure.
    #[error("{message}")]
    Failed { message: String },

    /// The action body panicked.
    #[error("panicked: {message}")]
    Panicked { message: String },

    /// An assignment action returned something other than a JSON object.
    #[error("assignment must return a JSON object, got {found}")]
    InvalidAssignment { found: String },
}

impl ActionError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::Panicked { message }
    }
}

/// The fault that moved an actor to the `error` status.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Action '{action}' failed while handling '{event}': {source}")]
pub struct ActionFault {
    pub action: String,
    pub event: String,
    #[source]
    pub source: ActionError,
}
