//! HTTP API Layer
//!
//! REST surface for the consultation payments core using Axum:
//!
//! - the two callable-function endpoints (`check-phone`, `verify-payment`)
//! - payment confirmation after a successful checkout
//! - operator refund initiation and inspection
//! - plan catalog reads
//!
//! Verification runs behind an explicit request timeout so it fails closed
//! rather than hangs.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use core_kernel::PhoneDirectory;
use domain_payment::{PaymentService, ServiceRequestStore};
use domain_pricing::PricingCatalog;
use domain_refund::RefundService;

use crate::config::ApiConfig;
use crate::handlers::{functions, health, payments, plans};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub catalog: Arc<PricingCatalog>,
    pub payments: Arc<PaymentService>,
    pub refunds: Arc<RefundService>,
    pub directory: Arc<dyn PhoneDirectory>,
    pub service_requests: Arc<dyn ServiceRequestStore>,
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    // Public routes (no API prefix)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Callable-function surface kept from the original deployment
    let function_routes = Router::new()
        .route("/check-phone", post(functions::check_phone))
        .route("/verify-payment", post(functions::verify_payment));

    let payment_routes = Router::new()
        .route("/confirm", post(payments::confirm_payment))
        .route("/:id/refunds", post(payments::create_refund))
        .route("/:id/refundable", get(payments::refund_position));

    let plan_routes = Router::new()
        .route("/", get(plans::list_plans))
        .route("/:key", get(plans::get_plan));

    let api_routes = Router::new()
        .nest("/functions", function_routes)
        .nest("/payments", payment_routes)
        .nest("/plans", plan_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
