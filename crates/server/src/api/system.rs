// Service-level routes: greeting, health and host description

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use hostbench_workloads::{ResourceSampler, SystemInfo};
use serde::Serialize;
use utoipa::ToSchema;

/// Text returned by `GET /`
pub const GREETING: &str = "Hello from hostbench";

/// App state for system routes
#[derive(Clone)]
pub struct AppState {
    pub sampler: Arc<dyn ResourceSampler>,
}

impl AppState {
    pub fn new(sampler: Arc<dyn ResourceSampler>) -> Self {
        Self { sampler }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Create system routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/system-info", get(system_info))
        .with_state(state)
}

async fn root() -> &'static str {
    GREETING
}

/// GET /health - Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /system-info - Platform, uptime and process resource usage
#[utoipa::path(
    get,
    path = "/system-info",
    responses(
        (status = 200, description = "Host description", body = SystemInfo)
    ),
    tag = "system"
)]
pub async fn system_info(State(state): State<AppState>) -> Json<SystemInfo> {
    let snapshot = state.sampler.snapshot();
    Json(SystemInfo::collect(env!("CARGO_PKG_VERSION"), snapshot))
}
