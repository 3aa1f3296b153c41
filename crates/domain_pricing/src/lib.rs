//! Pricing domain
//!
//! Consultation plans are a closed set of three tiers. The catalog resolves
//! a plan from a remote source with a built-in fallback table, so callers
//! always get a usable plan set even when the remote config is down.

pub mod catalog;
pub mod error;
pub mod plan;

pub use catalog::{PlanSource, PricingCatalog, CACHE_TTL};
pub use error::PricingError;
pub use plan::{fallback_plans, PlanKey, PricingPlan};
