//! # Hostbench Workloads
//!
//! Self-timed synthetic workloads for characterizing a host under compute,
//! memory, serialization and concurrency load.
//!
//! Every generator is a function of its parameter plus the clock and a random
//! source. Nothing is shared between invocations and nothing is persisted.
//!
//! ```text
//!   parameter ──► coerce (params) ──► generator ──► measure ──► report
//!                                                      │
//!                                   ResourceSampler ───┘ (memory, system info)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use hostbench_workloads::{run_compute, NaiveFibonacci, WorkloadKind};
//!
//! let n = WorkloadKind::Compute.parameter(Some("30"));
//! let report = run_compute(&NaiveFibonacci, n);
//! assert_eq!(report.result, 832_040);
//! ```

pub mod compute;
pub mod concurrency;
pub mod error;
pub mod measure;
pub mod memory;
pub mod params;
pub mod payload;
pub mod resources;
pub mod serialization;
pub mod system;

pub use compute::{fibonacci, run_compute, ComputeKernel, ComputeReport, NaiveFibonacci};
pub use concurrency::{run_concurrency, ConcurrencyReport, TaskCompletion, TASK_COUNT};
pub use error::{Result, WorkloadError};
pub use measure::{measure, measure_async, Timed};
pub use memory::{element_count, run_memory, MemoryReport};
pub use params::{coerce_parameter, WorkloadKind};
pub use payload::{run_payload, PayloadItem, PayloadReport};
pub use resources::{CpuUsage, MemoryUsage, ProcessSampler, ResourceSampler, ResourceSnapshot};
pub use serialization::{run_serialization, SerializationReport, GENERATED_RECORDS};
pub use system::SystemInfo;
