//! Concurrency workload
//!
//! Spawns [`TASK_COUNT`] tasks onto the tokio runtime. Each one sleeps for the
//! requested delay and records when it woke up. The sleeps overlap, so the
//! whole batch finishes in about one delay rather than `TASK_COUNT` delays.
//! The join is a wait-all barrier: either every task completes or the
//! invocation fails.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{Result, WorkloadError};
use crate::measure::{measure_async, ms_string};

/// Number of tasks spawned per invocation
pub const TASK_COUNT: usize = 10;

/// One task's completion record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub task_id: usize,
    /// Epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 1735689600123_i64))]
    pub completed_at: DateTime<Utc>,
}

/// Result of one concurrency invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConcurrencyReport {
    #[serde(with = "ms_string")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "100ms"))]
    pub delay_per_task: Duration,
    pub tasks_completed: usize,
    #[serde(with = "ms_string")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "101ms"))]
    pub total_execution_time: Duration,
    /// Ordered by task id
    pub results: Vec<TaskCompletion>,
    pub timestamp: DateTime<Utc>,
}

async fn join_delayed_tasks(delay: Duration, count: usize) -> Result<Vec<TaskCompletion>> {
    let mut tasks = JoinSet::new();

    for task_id in 0..count {
        tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            TaskCompletion {
                task_id,
                completed_at: Utc::now(),
            }
        });
    }

    let mut results = Vec::with_capacity(count);
    while let Some(joined) = tasks.join_next().await {
        let completion = joined.map_err(|e| WorkloadError::TaskJoin(e.to_string()))?;
        results.push(completion);
    }

    results.sort_by_key(|completion| completion.task_id);
    Ok(results)
}

/// Run [`TASK_COUNT`] overlapping delayed tasks and wait for all of them
pub async fn run_concurrency(delay: Duration) -> Result<ConcurrencyReport> {
    let timed = measure_async(join_delayed_tasks(delay, TASK_COUNT))
        .await
        .transpose()?;

    tracing::debug!(
        delay_ms = crate::measure::duration_to_ms(delay),
        tasks = timed.value.len(),
        elapsed_ms = timed.elapsed_ms(),
        "concurrency workload finished"
    );

    Ok(ConcurrencyReport {
        delay_per_task: delay,
        tasks_completed: timed.value.len(),
        total_execution_time: timed.elapsed,
        results: timed.value,
        timestamp: Utc::now(),
    })
}
