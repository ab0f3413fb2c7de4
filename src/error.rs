use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Status change not allowed: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("No stock available")]
    OutOfStock,

    #[error("Handler for {expected} invoked on a {actual} form")]
    WrongEntity { expected: String, actual: String },

    #[error("Handler already registered for {entity} / {event}")]
    DuplicateHandler { entity: String, event: String },

    #[error("Event {event} does not belong to entity {entity}")]
    MismatchedHandler { entity: String, event: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// Shorthand for the most common rejection.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
