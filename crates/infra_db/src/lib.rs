//! Database infrastructure layer
//!
//! SQLx/Postgres adapters for the domain ports. Repositories own the row
//! mapping; domain crates never see SQL.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations};
pub use repositories::{
    CommissionRepository, DirectoryRepository, PaymentRepository, PricingRepository,
    RefundRepository, ServiceRequestRepository,
};
