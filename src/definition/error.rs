//! Construction errors for machine definitions.

use crate::core::StateValue;
use thiserror::Error;

/// Errors that can occur when building a machine definition.
///
/// All of these are configuration mistakes: they are reported before any
/// actor exists and never surface at run time.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Machine '{machine}': initial state '{initial}' is not a defined state")]
    InvalidInitialState { machine: String, initial: StateValue },

    #[error(
        "Machine '{machine}': transition on '{event}' from {} targets undefined state '{target}'",
        source_label(.state)
    )]
    UnknownTarget {
        machine: String,
        /// `None` for a global transition
        state: Option<StateValue>,
        event: String,
        target: StateValue,
    },

    #[error("Machine '{machine}': initial context must be a JSON object")]
    ContextNotObject { machine: String },
}

fn source_label(state: &Option<StateValue>) -> String {
    match state {
        Some(state) => format!("state '{state}'"),
        None => "the machine (global)".to_string(),
    }
}
