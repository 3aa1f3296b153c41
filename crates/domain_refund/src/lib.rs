//! Refund domain
//!
//! Refunds may be initiated within a fixed window after payment and never
//! beyond the payment's remaining refundable amount. Client-side checks are
//! untrusted; the service re-validates everything.

pub mod eligibility;
pub mod error;
pub mod refund;
pub mod service;

pub use eligibility::{is_refund_eligible, remaining_refundable, REFUND_WINDOW_DAYS};
pub use error::RefundError;
pub use refund::{RefundRecord, RefundStatus};
pub use service::{RefundPosition, RefundService, RefundStore};
