//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`ParseError`] thrown when a chat message cannot be read as an expense.
//! - [`EngineError`] thrown by the expense store and by enum conversions at
//!   the storage/API boundary.
use sea_orm::DbErr;
use thiserror::Error;

/// Reasons a free-text message could not be turned into an [`Expense`].
///
/// The set is closed: callers are expected to `match` it exhaustively when
/// building user facing text.
///
/// [`Expense`]: crate::Expense
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty message")]
    EmptyMessage,
    #[error("not enough data")]
    NotEnoughData,
    #[error("payment type not found")]
    PaymentTypeNotFound,
    #[error("amount not found")]
    AmountNotFound,
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid payment type: {0}")]
    InvalidPaymentType(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidPaymentType(a), Self::InvalidPaymentType(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
