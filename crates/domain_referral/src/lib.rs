//! Referral domain
//!
//! A partner who referred the paying client earns a commission computed from
//! the apportioned base amount. Commission creation is idempotent per
//! (partner, service request).

pub mod commission;
pub mod error;
pub mod service;

pub use commission::{compute_commission, CommissionMode, CommissionStatus, Partner, PartnerCommission};
pub use error::ReferralError;
pub use service::{CommissionService, CommissionStore, PartnerDirectory};
