use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tenancy::accounts::{staff_router, user_router, AccountService};
use tenancy::config::ListingConfig;
use tenancy::properties::{property_router, PropertyService};
use tenancy::rsls::{rsl_router, RslService};
use tenancy::store::InMemoryStore;
use tenancy::tenants::{tenant_router, TenantService};

/// Every API router over one shared store, plus the operational endpoints.
pub(crate) fn with_api_routes(store: Arc<InMemoryStore>, listing: ListingConfig) -> Router {
    let accounts = Arc::new(AccountService::new(store.clone()));
    let properties = Arc::new(PropertyService::new(store.clone(), store.clone()));
    let tenants = Arc::new(TenantService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        listing,
    ));
    let rsls = Arc::new(RslService::new(store));

    user_router(accounts.clone())
        .merge(staff_router(accounts))
        .merge(property_router(properties))
        .merge(tenant_router(tenants))
        .merge(rsl_router(rsls))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
