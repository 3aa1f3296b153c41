//! Consultation payments API server binary
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_RAZORPAY_KEY_SECRET` - Gateway secret for callback verification
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_payment::PaymentService;
use domain_pricing::PricingCatalog;
use domain_referral::CommissionService;
use domain_refund::RefundService;
use infra_db::{
    create_pool, run_migrations, CommissionRepository, DirectoryRepository, PaymentRepository,
    PricingRepository, RefundRepository, ServiceRequestRepository,
};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().unwrap_or_default();
    init_tracing(&config.log_level);

    if config.razorpay_key_secret.is_empty() {
        tracing::warn!("gateway secret is not configured; payment verification will fail");
    }

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "starting consultation payments API server"
    );

    let pool = create_pool(&config.database_url, 10)
        .await
        .context("connecting to database")?;
    run_migrations(&pool).await.context("applying migrations")?;

    let catalog = Arc::new(PricingCatalog::new(Arc::new(PricingRepository::new(
        pool.clone(),
    ))));
    let commission_repo = Arc::new(CommissionRepository::new(pool.clone()));
    let commissions = Arc::new(CommissionService::new(
        commission_repo.clone(),
        commission_repo,
    ));
    let payments = Arc::new(PaymentService::new(
        catalog.clone(),
        Arc::new(PaymentRepository::new(pool.clone())),
        commissions,
    ));
    let refunds = Arc::new(RefundService::new(Arc::new(RefundRepository::new(
        pool.clone(),
    ))));

    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        catalog,
        payments,
        refunds,
        directory: Arc::new(DirectoryRepository::new(pool.clone())),
        service_requests: Arc::new(ServiceRequestRepository::new(pool)),
    };

    let app = create_router(state);
    let addr: SocketAddr = config.server_addr().parse().context("parsing address")?;
    tracing::info!(%addr, "server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM so in-flight requests can complete
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        }
    }
}
