//! Payload workload
//!
//! Builds a large, uniform response body. The cost being exercised is
//! encoding and transport of the result, not the generation itself.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{Result, WorkloadError};
use crate::measure::{measure, ms_string};

/// Records generated per requested kilobyte
pub const ITEMS_PER_KB: u64 = 10;

/// Length of every record's filler string
pub const FILLER_LEN: usize = 100;

/// One generated record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PayloadItem {
    pub id: u64,
    /// `FILLER_LEN` characters
    pub data: String,
    /// Generation instant in epoch milliseconds
    pub timestamp: i64,
    pub random: f64,
}

/// Result of one payload invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PayloadReport {
    #[serde(rename = "requestedSizeKB")]
    pub requested_size_kb: u64,
    pub actual_items: usize,
    #[serde(with = "ms_string")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "1ms"))]
    pub generation_time: Duration,
    pub data: Vec<PayloadItem>,
    pub timestamp: DateTime<Utc>,
}

/// `size_kb * ITEMS_PER_KB`
pub fn item_count(size_kb: u64) -> Result<usize> {
    size_kb
        .checked_mul(ITEMS_PER_KB)
        .and_then(|count| usize::try_from(count).ok())
        .ok_or_else(|| WorkloadError::size_overflow("sizeInKB", size_kb))
}

fn generate_items(count: usize) -> Vec<PayloadItem> {
    let filler = "x".repeat(FILLER_LEN);

    (0..count as u64)
        .map(|id| PayloadItem {
            id,
            data: filler.clone(),
            timestamp: Utc::now().timestamp_millis(),
            random: rand::random::<f64>(),
        })
        .collect()
}

/// Generate `size_kb * 10` records
pub fn run_payload(size_kb: u64) -> Result<PayloadReport> {
    let count = item_count(size_kb)?;
    let timed = measure(|| generate_items(count));

    tracing::debug!(
        size_kb,
        items = timed.value.len(),
        elapsed_ms = timed.elapsed_ms(),
        "payload workload finished"
    );

    Ok(PayloadReport {
        requested_size_kb: size_kb,
        actual_items: timed.value.len(),
        generation_time: timed.elapsed,
        data: timed.value,
        timestamp: Utc::now(),
    })
}
