// Hostbench Server Library
// Decision: Router assembly lives here so tests can drive it without binding a socket

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use hostbench_workloads::{ComputeKernel, NaiveFibonacci, ProcessSampler, ResourceSampler};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod api;
pub mod config;
pub mod openapi;
pub mod telemetry;

pub use config::ServerConfig;

/// Shared collaborators handed to every route group
#[derive(Clone)]
pub struct Services {
    pub kernel: Arc<dyn ComputeKernel>,
    pub sampler: Arc<dyn ResourceSampler>,
}

impl Services {
    pub fn new(kernel: Arc<dyn ComputeKernel>, sampler: Arc<dyn ResourceSampler>) -> Self {
        Self { kernel, sampler }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(Arc::new(NaiveFibonacci), Arc::new(ProcessSampler::new()))
    }
}

/// Assemble the full application router
pub fn build_app(services: Services, config: &ServerConfig) -> Router {
    let workloads_state = api::workloads::AppState::new(services.kernel, services.sampler.clone());
    let system_state = api::system::AppState::new(services.sampler);

    let app = Router::new()
        .merge(api::system::routes(system_state))
        .merge(build_router_with_prefix(
            api::workloads::routes(workloads_state),
            &config.api_prefix,
        ))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-doc/openapi.json", openapi::ApiDoc::openapi()),
        );

    let app = if config.cors_origins.is_empty() {
        app
    } else {
        app.layer(cors_layer(config.cors_origins.clone()))
    };

    app.layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}

/// Build router with optional API prefix (extracted for testing)
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
