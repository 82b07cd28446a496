use crate::config::ConfigurationError;
use crate::state_machine::errors::{PersistenceError, StateMachineError};
use serde::Serialize;
use std::fmt;

/// Error category shared by every layer of the crate. Callers at the edge map
/// it to a response; the core only ever raises it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// HTTP status code conventionally used for this kind
    pub fn http_status(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Service-level error for order operations
#[derive(Debug, thiserror::Error)]
pub enum PizzaError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    StateMachine(#[from] StateMachineError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl PizzaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Internal(_) | Self::Configuration(_) => ErrorKind::Internal,
            Self::StateMachine(err) => err.kind(),
            Self::Persistence(PersistenceError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Persistence(PersistenceError::ConcurrentModification { .. }) => {
                ErrorKind::Conflict
            }
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, PizzaError>;
