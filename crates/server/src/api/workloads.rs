// Workload HTTP routes
//
// Each route extracts one raw parameter, coerces it with the workload's
// default, runs the generator and returns its report as JSON. Synchronous
// generators run on the blocking pool; the concurrency workload runs on the
// async runtime because its tasks must interleave there.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use hostbench_workloads::{
    run_compute, run_concurrency, run_memory, run_payload, run_serialization, ComputeKernel,
    ComputeReport, ConcurrencyReport, MemoryReport, PayloadReport, ResourceSampler,
    SerializationReport, WorkloadKind,
};
use serde_json::Value;

use super::common::{ApiError, ErrorResponse};

/// App state for workload routes
#[derive(Clone)]
pub struct AppState {
    pub kernel: Arc<dyn ComputeKernel>,
    pub sampler: Arc<dyn ResourceSampler>,
}

impl AppState {
    pub fn new(kernel: Arc<dyn ComputeKernel>, sampler: Arc<dyn ResourceSampler>) -> Self {
        Self { kernel, sampler }
    }
}

/// Create workload routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cpu", get(cpu))
        .route("/cpu/:n", get(cpu))
        .route("/memory", get(memory))
        .route("/memory/:size", get(memory))
        .route("/json-process", post(json_process))
        .route("/concurrent", get(concurrent))
        .route("/concurrent/:delay", get(concurrent))
        .route("/load-test", get(load_test))
        .route("/load-test/:size", get(load_test))
        .with_state(state)
}

fn raw_param(param: &Option<Path<String>>) -> Option<&str> {
    param.as_ref().map(|Path(raw)| raw.as_str())
}

async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await?)
}

/// Decode a request body into the payload embedded by the serialization workload
///
/// An empty body is `null`, a JSON body is used as-is, and any other UTF-8
/// text becomes a JSON string.
pub fn decode_payload(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    if let Ok(value) = serde_json::from_slice(body) {
        return Ok(value);
    }
    std::str::from_utf8(body)
        .map(|text| Value::String(text.to_string()))
        .map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// GET /cpu/{n} - Naive recursive Fibonacci
#[utoipa::path(
    get,
    path = "/cpu/{n}",
    params(
        ("n" = String, Path, description = "Recursion depth; unparsable values use 35")
    ),
    responses(
        (status = 200, description = "Compute workload finished", body = ComputeReport),
        (status = 500, description = "Workload failed", body = ErrorResponse)
    ),
    tag = "workloads"
)]
pub async fn cpu(
    State(state): State<AppState>,
    n: Option<Path<String>>,
) -> Result<Json<ComputeReport>, ApiError> {
    let n = WorkloadKind::Compute.parameter(raw_param(&n));
    let kernel = state.kernel.clone();

    let report = run_blocking(move || run_compute(kernel.as_ref(), n)).await?;
    Ok(Json(report))
}

/// GET /memory/{size} - Allocate and fill `size` megabytes
#[utoipa::path(
    get,
    path = "/memory/{size}",
    params(
        ("size" = String, Path, description = "Megabytes to allocate; unparsable values use 10")
    ),
    responses(
        (status = 200, description = "Memory workload finished", body = MemoryReport),
        (status = 500, description = "Workload failed", body = ErrorResponse)
    ),
    tag = "workloads"
)]
pub async fn memory(
    State(state): State<AppState>,
    size: Option<Path<String>>,
) -> Result<Json<MemoryReport>, ApiError> {
    let size_mb = WorkloadKind::Memory.parameter(raw_param(&size));
    let sampler = state.sampler.clone();

    let report = run_blocking(move || run_memory(size_mb, sampler.as_ref())).await??;
    Ok(Json(report))
}

/// POST /json-process - Serialize and parse a document embedding the body
#[utoipa::path(
    post,
    path = "/json-process",
    request_body(content = String, content_type = "application/json", description = "Any payload"),
    responses(
        (status = 200, description = "Round trip finished", body = SerializationReport),
        (status = 400, description = "Body is not valid UTF-8", body = ErrorResponse),
        (status = 500, description = "Workload failed", body = ErrorResponse)
    ),
    tag = "workloads"
)]
pub async fn json_process(body: Bytes) -> Result<Json<SerializationReport>, ApiError> {
    let payload = decode_payload(&body)?;

    let report = run_blocking(move || run_serialization(&payload)).await??;
    Ok(Json(report))
}

/// GET /concurrent/{delay} - Ten overlapping delayed tasks
#[utoipa::path(
    get,
    path = "/concurrent/{delay}",
    params(
        ("delay" = String, Path, description = "Per-task delay in milliseconds; unparsable values use 100")
    ),
    responses(
        (status = 200, description = "All tasks completed", body = ConcurrencyReport),
        (status = 500, description = "A task failed", body = ErrorResponse)
    ),
    tag = "workloads"
)]
pub async fn concurrent(delay: Option<Path<String>>) -> Result<Json<ConcurrencyReport>, ApiError> {
    let delay_ms = WorkloadKind::Concurrency.parameter(raw_param(&delay));

    let report = run_concurrency(Duration::from_millis(delay_ms)).await?;
    Ok(Json(report))
}

/// GET /load-test/{size} - Generate a large response body
#[utoipa::path(
    get,
    path = "/load-test/{size}",
    params(
        ("size" = String, Path, description = "Response size in kilobytes; unparsable values use 100")
    ),
    responses(
        (status = 200, description = "Payload generated", body = PayloadReport),
        (status = 500, description = "Workload failed", body = ErrorResponse)
    ),
    tag = "workloads"
)]
pub async fn load_test(size: Option<Path<String>>) -> Result<Json<PayloadReport>, ApiError> {
    let size_kb = WorkloadKind::Payload.parameter(raw_param(&size));

    let report = run_blocking(move || run_payload(size_kb)).await??;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_body() {
        assert_eq!(decode_payload(b"").unwrap(), Value::Null);
        assert_eq!(decode_payload(b" \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_json_body() {
        let value = decode_payload(br#"{"a":[1,2]}"#).unwrap();
        assert_eq!(value, serde_json::json!({"a": [1, 2]}));
    }

    #[test]
    fn test_decode_text_body() {
        let value = decode_payload(b"hello there").unwrap();
        assert_eq!(value, Value::String("hello there".to_string()));
    }

    #[test]
    fn test_decode_binary_body() {
        let err = decode_payload(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }
}
