//! Core Kernel - Foundational types for the consultation payments system
//!
//! This crate provides the building blocks shared by all domain modules:
//! - Currency and rate primitives for whole-unit monetary amounts
//! - Strongly-typed identifiers
//! - Cross-domain ports for external collaborators

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{
    AstrologerId, ClientId, CommissionId, PartnerId, PaymentRecordId, RefundId,
    ServiceRequestId,
};
pub use money::{Currency, MoneyError, Rate};
pub use ports::{DirectoryError, PhoneDirectory};
