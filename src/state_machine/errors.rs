use super::states::OrderStatus;
use crate::error::ErrorKind;
use thiserror::Error;

/// Error types raised by the order state machine.
///
/// The first four variants are the signaled kinds of the transition protocol.
/// A `false` validation outcome is never represented here: it surfaces as an
/// empty result from the dispatcher instead.
#[derive(Error, Debug)]
pub enum StateMachineError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Target status [{to}] not compatible with current order status [{}]", display_status(.from))]
    InvalidTransition {
        from: Option<OrderStatus>,
        to: OrderStatus,
    },

    #[error("Persistence operation failed: {0}")]
    PersistenceFailed(#[from] PersistenceError),
}

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Order {id} not found")]
    NotFound { id: i64 },

    #[error("Concurrent modification detected for order {entity_id}")]
    ConcurrentModification { entity_id: i64 },

    #[error("Invalid order data: {field}")]
    InvalidData { field: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StateMachineError {
    /// Error category used by callers to pick a response
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) | Self::InvalidTransition { .. } => ErrorKind::BadRequest,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
            Self::PersistenceFailed(PersistenceError::ConcurrentModification { .. }) => {
                ErrorKind::Conflict
            }
            Self::PersistenceFailed(_) => ErrorKind::Internal,
        }
    }
}

fn display_status(status: &Option<OrderStatus>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

/// Result type alias for state machine operations
pub type StateMachineResult<T> = Result<T, StateMachineError>;
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Helper function to create bad request errors
pub fn bad_request(msg: impl Into<String>) -> StateMachineError {
    StateMachineError::BadRequest(msg.into())
}

/// Helper function to create role violation errors
pub fn forbidden(msg: impl Into<String>) -> StateMachineError {
    StateMachineError::Forbidden(msg.into())
}

/// Helper function to create admission control errors
pub fn conflict(msg: impl Into<String>) -> StateMachineError {
    StateMachineError::Conflict(msg.into())
}

/// Helper function to create internal errors
pub fn internal_error(msg: impl Into<String>) -> StateMachineError {
    StateMachineError::Internal(msg.into())
}
