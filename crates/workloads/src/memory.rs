//! Memory workload
//!
//! Allocates `sizeInMB` worth of 8-byte slots and fills every slot with the
//! same freshly drawn random value. Filling with one repeated value is part of
//! the benchmark's memory-bandwidth profile and is kept as is.
//!
//! The buffer is released when the invocation returns. Nothing bounds the
//! size, and concurrent invocations each hold their own buffer at once, so
//! peak process memory grows with request concurrency.

use std::hint::black_box;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{Result, WorkloadError};
use crate::measure::{measure, ms_string};
use crate::resources::{MemoryUsage, ResourceSampler};

/// Bytes attributed to each logical element
pub const ELEMENT_SIZE_BYTES: u64 = 8;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Result of one memory invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MemoryReport {
    #[serde(rename = "allocatedSizeMB")]
    pub allocated_size_mb: u64,
    pub array_length: usize,
    #[serde(with = "ms_string")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "4ms"))]
    pub execution_time: Duration,
    /// Process memory while the buffer is still held
    pub memory_usage: MemoryUsage,
    pub timestamp: DateTime<Utc>,
}

/// `floor(size_mb * 1024 * 1024 / 8)`
pub fn element_count(size_mb: u64) -> Result<usize> {
    let bytes = size_mb
        .checked_mul(BYTES_PER_MB)
        .ok_or_else(|| WorkloadError::size_overflow("sizeInMB", size_mb))?;
    usize::try_from(bytes / ELEMENT_SIZE_BYTES)
        .map_err(|_| WorkloadError::size_overflow("sizeInMB", size_mb))
}

fn filled_buffer(len: usize, value: f64) -> Result<Vec<f64>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Allocate and fill the buffer, then report its length and process memory
pub fn run_memory(size_mb: u64, sampler: &dyn ResourceSampler) -> Result<MemoryReport> {
    let len = element_count(size_mb)?;

    let timed = measure(|| filled_buffer(len, rand::random::<f64>())).transpose()?;
    let buffer = black_box(timed.value);
    let snapshot = sampler.snapshot();

    tracing::debug!(
        size_mb,
        array_length = buffer.len(),
        elapsed_ms = crate::measure::duration_to_ms(timed.elapsed),
        rss = snapshot.memory_usage.rss,
        "memory workload finished"
    );

    Ok(MemoryReport {
        allocated_size_mb: size_mb,
        array_length: buffer.len(),
        execution_time: timed.elapsed,
        memory_usage: snapshot.memory_usage,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{CpuUsage, ResourceSnapshot};

    struct FixedSampler;

    impl ResourceSampler for FixedSampler {
        fn snapshot(&self) -> ResourceSnapshot {
            ResourceSnapshot {
                uptime: 1.5,
                memory_usage: MemoryUsage {
                    rss: 4096,
                    virtual_memory: 8192,
                },
                cpu_usage: CpuUsage { user: 10, system: 5 },
            }
        }
    }

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(1).unwrap(), 131_072);
        assert_eq!(element_count(10).unwrap(), 1_310_720);
        assert_eq!(element_count(0).unwrap(), 0);
    }

    #[test]
    fn test_element_count_overflow() {
        let err = element_count(u64::MAX).unwrap_err();
        assert!(matches!(
            err,
            WorkloadError::SizeOverflow {
                parameter: "sizeInMB",
                ..
            }
        ));
    }

    #[test]
    fn test_buffer_repeats_one_value() {
        let buffer = filled_buffer(1024, 0.25).unwrap();
        assert_eq!(buffer.len(), 1024);
        assert!(buffer.iter().all(|v| *v == 0.25));
    }

    #[test]
    fn test_run_memory_reports_exact_length() {
        let report = run_memory(1, &FixedSampler).unwrap();
        assert_eq!(report.allocated_size_mb, 1);
        assert_eq!(report.array_length, 131_072);
        assert_eq!(report.memory_usage.rss, 4096);
    }

    #[test]
    fn test_report_wire_names() {
        let json = serde_json::to_value(run_memory(2, &FixedSampler).unwrap()).unwrap();
        assert_eq!(json["allocatedSizeMB"], 2);
        assert_eq!(json["arrayLength"], 262_144);
        assert_eq!(json["memoryUsage"]["virtualMemory"], 8192);
        assert!(json["executionTime"].as_str().unwrap().ends_with("ms"));
    }
}
