use crate::cli::ServeArgs;
use crate::infra::{build_store, AppState};
use crate::routes::with_api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tenancy::config::AppConfig;
use tenancy::error::AppError;
use tenancy::telemetry;
use tracing::info;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let config = args.apply(AppConfig::load()?);
    telemetry::init(&config.telemetry)?;

    // Seed problems abort startup before anything binds.
    let store = build_store(config.store.seed_path.as_deref())?;
    let addr = config.server.socket_addr()?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let state = AppState {
        readiness: Arc::new(AtomicBool::new(false)),
        metrics: Arc::new(prometheus_handle),
    };
    let readiness = state.readiness.clone();

    let app = with_api_routes(store, config.listing.clone())
        .layer(Extension(state))
        .layer(prometheus_layer);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);
    info!(environment = ?config.environment, %addr, "tenancy back office listening");

    axum::serve(listener, app).await?;
    Ok(())
}
