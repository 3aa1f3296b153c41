//! Shared test fixtures and builders
//!
//! Used by crate test suites; never compiled into production binaries.

pub mod builders;

pub use builders::{demo_gateway_response, gateway_response, PaymentRecordFixture};
