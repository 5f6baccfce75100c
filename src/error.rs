//! Engine error taxonomy.

use thiserror::Error;

/// Which kind of mutating operation a [`EngineError::Validation`] was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Reservation,
    Cancellation,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Reservation => f.write_str("reservation"),
            OperationKind::Cancellation => f.write_str("cancellation"),
        }
    }
}

/// Every error the engine can return to a caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{operation} rejected: {message}")]
    Validation {
        operation: OperationKind,
        message: String,
    },

    #[error("no matching reservation")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] std::io::Error),
}

impl EngineError {
    pub fn validation(operation: OperationKind, message: impl Into<String>) -> Self {
        Self::Validation {
            operation,
            message: message.into(),
        }
    }
}
