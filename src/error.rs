use crate::actor_framework::FrameworkError;
use crate::domain::OrderStatus;
use thiserror::Error;

/// A failed call to the collaborator. Callers treat every kind the same
/// way: notify, keep the last good data, let the user retry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rejected by service: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for RemoteError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(what) => RemoteError::NotFound(what),
            FrameworkError::Rejected(reason) => RemoteError::Rejected(reason),
            other => RemoteError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Local input problems caught before any remote call is made.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("Quantity must be at least 1")]
    NonPositiveQuantity,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Order {0} is not loaded")]
    UnknownOrder(u64),
    #[error("A {0} order has no next step")]
    NoForwardStep(OrderStatus),
}

/// What a screen surfaces to the user after an operation fails.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// Remote failures may be retried by re-issuing the action; bad input
    /// has to be fixed first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Remote(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
