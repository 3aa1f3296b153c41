//! Cross-domain ports for external collaborators
//!
//! The identity provider that owns phone numbers is an external system; the
//! kernel defines the seam and adapters in `infra_db` (or tests) supply an
//! implementation.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from directory lookups
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory lookup failed: {0}")]
    LookupFailed(String),
}

/// Lookup of registered phone numbers in the identity directory
///
/// "Not registered" is a normal `false` result, never an error.
#[async_trait]
pub trait PhoneDirectory: Send + Sync {
    async fn phone_exists(&self, phone: &str) -> Result<bool, DirectoryError>;
}
