//! Payment domain
//!
//! Splits a plan's amounts across recipients without losing or inventing a
//! single currency unit, persists one payment record per recipient, and
//! verifies gateway callback signatures inside the trusted server context.

pub mod apportion;
pub mod error;
pub mod record;
pub mod service;
pub mod signature;

pub use apportion::{apportion, Share};
pub use error::PaymentError;
pub use record::{GatewayReference, GatewayResponse, PaymentRecord, DEMO_PAYMENT_PREFIX};
pub use service::{PaymentService, PaymentStore, Recipient, ServiceRequestStore};
pub use signature::{sign_payload, verify_signature};
