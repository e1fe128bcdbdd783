// OpenAPI document for the workload server

use hostbench_workloads::{
    ComputeReport, ConcurrencyReport, CpuUsage, MemoryReport, MemoryUsage, PayloadItem,
    PayloadReport, SerializationReport, SystemInfo, TaskCompletion,
};
use utoipa::OpenApi;

use crate::api;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::workloads::cpu,
        api::workloads::memory,
        api::workloads::json_process,
        api::workloads::concurrent,
        api::workloads::load_test,
        api::system::health,
        api::system::system_info,
    ),
    components(
        schemas(
            ComputeReport,
            MemoryReport, MemoryUsage, CpuUsage,
            SerializationReport,
            ConcurrencyReport, TaskCompletion,
            PayloadReport, PayloadItem,
            SystemInfo,
            api::system::HealthResponse,
            api::ErrorResponse,
        )
    ),
    tags(
        (name = "workloads", description = "Self-timed synthetic workloads"),
        (name = "system", description = "Health and host information")
    ),
    info(
        title = "Hostbench API",
        version = "0.1.0",
        description = "Request-triggered compute, memory, serialization and concurrency workloads",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;
