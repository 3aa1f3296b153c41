//! Referral error types

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur in the referral domain
///
/// Callers in the payment flow treat every variant as best-effort: a failed
/// commission never fails the enclosing payment.
#[derive(Debug, Error)]
pub enum ReferralError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Storage error: {0}")]
    Storage(String),
}
