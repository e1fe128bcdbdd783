//! Compute workload
//!
//! CPU-bound and deterministic. The default kernel is the naive exponential
//! Fibonacci recursion; it is the load being measured, so it must stay naive.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::measure::{measure, ms_string};

/// A CPU-bound function that can be swapped in for the compute workload
pub trait ComputeKernel: Send + Sync {
    /// Short identifier reported alongside results
    fn name(&self) -> &str;

    /// Compute the kernel's output for input `n`
    fn compute(&self, n: u64) -> u64;
}

/// `fib(0)=0`, `fib(1)=1`, `fib(k)=fib(k-1)+fib(k-2)`, without memoization
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveFibonacci;

impl NaiveFibonacci {
    pub const NAME: &'static str = "naive_fibonacci";
}

impl ComputeKernel for NaiveFibonacci {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn compute(&self, n: u64) -> u64 {
        fibonacci(n)
    }
}

/// Naive recursive Fibonacci
pub fn fibonacci(n: u64) -> u64 {
    if n <= 1 {
        return n;
    }
    fibonacci(n - 1).wrapping_add(fibonacci(n - 2))
}

/// Result of one compute invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ComputeReport {
    pub input: u64,
    pub kernel: String,
    pub result: u64,
    #[serde(with = "ms_string")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "57ms"))]
    pub execution_time: Duration,
    pub timestamp: DateTime<Utc>,
}

/// Run `kernel` on `n` and time it
pub fn run_compute(kernel: &dyn ComputeKernel, n: u64) -> ComputeReport {
    let timed = measure(|| kernel.compute(n));

    tracing::debug!(
        kernel = kernel.name(),
        n,
        elapsed_ms = timed.elapsed_ms(),
        "compute workload finished"
    );

    ComputeReport {
        input: n,
        kernel: kernel.name().to_string(),
        result: timed.value,
        execution_time: timed.elapsed,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_cases() {
        assert_eq!(fibonacci(0), 0);
        assert_eq!(fibonacci(1), 1);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(fibonacci(2), 1);
        assert_eq!(fibonacci(10), 55);
        assert_eq!(fibonacci(20), 6765);
        assert_eq!(fibonacci(30), 832_040);
    }

    #[test]
    fn test_recurrence_holds() {
        for k in 2..=25 {
            assert_eq!(fibonacci(k), fibonacci(k - 1) + fibonacci(k - 2), "k={k}");
        }
    }

    #[test]
    fn test_run_compute_is_idempotent() {
        let first = run_compute(&NaiveFibonacci, 22);
        let second = run_compute(&NaiveFibonacci, 22);

        assert_eq!(first.input, 22);
        assert_eq!(first.result, 17_711);
        assert_eq!(first.result, second.result);
        assert_eq!(first.kernel, NaiveFibonacci::NAME);
    }

    struct Doubling;

    impl ComputeKernel for Doubling {
        fn name(&self) -> &str {
            "doubling"
        }

        fn compute(&self, n: u64) -> u64 {
            n * 2
        }
    }

    #[test]
    fn test_kernel_is_replaceable() {
        let report = run_compute(&Doubling, 21);
        assert_eq!(report.result, 42);
        assert_eq!(report.kernel, "doubling");
    }

    #[test]
    fn test_report_wire_format() {
        let json = serde_json::to_value(run_compute(&NaiveFibonacci, 10)).unwrap();
        assert_eq!(json["input"], 10);
        assert_eq!(json["result"], 55);
        assert!(json["executionTime"].as_str().unwrap().ends_with("ms"));
        assert!(json["timestamp"].is_string());
    }
}
