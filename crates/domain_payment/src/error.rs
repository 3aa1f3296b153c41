//! Payment error types

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur in the payment domain
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Missing or malformed caller input; surfaced immediately, never retried
    #[error("Validation error: {0}")]
    Validation(String),

    /// The server-side gateway secret is not configured
    ///
    /// Fatal for the invocation. The message is logged server-side; clients
    /// only ever see a generic internal error.
    #[error("Gateway secret is not configured")]
    MissingSecret,

    /// A persistence failure; propagated to the caller, no automatic retry
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
