//! Refund error types

use thiserror::Error;

/// Errors that can occur in the refund domain
#[derive(Debug, Error)]
pub enum RefundError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payment not found: {0}")]
    PaymentNotFound(String),

    /// The payment is outside the refund window
    #[error("Payment is no longer refund-eligible")]
    NotEligible,

    /// The requested amount exceeds what is still refundable
    #[error("Requested {requested} exceeds remaining refundable amount {remaining}")]
    ExceedsRemaining { requested: i64, remaining: i64 },

    #[error("Storage error: {0}")]
    Storage(String),
}
