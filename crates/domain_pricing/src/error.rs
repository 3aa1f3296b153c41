//! Pricing error types

use thiserror::Error;

/// Errors that can occur in the pricing domain
#[derive(Debug, Error)]
pub enum PricingError {
    /// The plan key is not one of the known tiers
    #[error("Unknown plan key: {0}")]
    UnknownPlan(String),

    /// A plan failed its construction invariants
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// The remote plan source could not be read
    #[error("Plan source unavailable: {0}")]
    SourceUnavailable(String),
}
