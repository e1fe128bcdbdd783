//! Process resource snapshots
//!
//! Counters are read on demand through [`ResourceSampler`] and handed to the
//! report that needs them, so nothing in the workloads reads global state.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Memory held by the process, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    /// Resident set size
    pub rss: u64,
    /// Virtual memory size
    pub virtual_memory: u64,
}

/// CPU time consumed by the process since it started, in microseconds
///
/// Both counters only ever grow; callers diff two snapshots to get the CPU
/// spent in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CpuUsage {
    pub user: u64,
    pub system: u64,
}

impl CpuUsage {
    /// User plus system time
    pub fn total(&self) -> u64 {
        self.user.saturating_add(self.system)
    }
}

/// Point-in-time read of process-wide counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResourceSnapshot {
    /// Seconds since the process started
    pub uptime: f64,
    pub memory_usage: MemoryUsage,
    pub cpu_usage: CpuUsage,
}

/// Source of resource snapshots
pub trait ResourceSampler: Send + Sync {
    /// Read the counters as they are right now
    fn snapshot(&self) -> ResourceSnapshot;
}

/// Samples the current process through the OS
pub struct ProcessSampler {
    pid: Pid,
    system: Mutex<System>,
}

impl ProcessSampler {
    pub fn new() -> Self {
        let pid = Pid::from_u32(std::process::id());
        let system = System::new_with_specifics(
            RefreshKind::new().with_processes(ProcessRefreshKind::everything()),
        );

        Self {
            pid,
            system: Mutex::new(system),
        }
    }
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceSampler for ProcessSampler {
    fn snapshot(&self) -> ResourceSnapshot {
        let mut system = self.system.lock();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::everything(),
        );

        let cpu_usage = process_cpu_time();
        match system.process(self.pid) {
            Some(process) => ResourceSnapshot {
                uptime: process.run_time() as f64,
                memory_usage: MemoryUsage {
                    rss: process.memory(),
                    virtual_memory: process.virtual_memory(),
                },
                cpu_usage,
            },
            None => {
                tracing::warn!(pid = %self.pid, "process not visible to sampler");
                ResourceSnapshot {
                    cpu_usage,
                    ..Default::default()
                }
            }
        }
    }
}

/// Cumulative CPU time of the calling process from `getrusage(RUSAGE_SELF)`
#[cfg(unix)]
fn process_cpu_time() -> CpuUsage {
    // SAFETY: rusage is plain old data and getrusage only writes into it.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        tracing::warn!(error = %std::io::Error::last_os_error(), "getrusage failed");
        return CpuUsage::default();
    }

    CpuUsage {
        user: timeval_micros(usage.ru_utime),
        system: timeval_micros(usage.ru_stime),
    }
}

#[cfg(unix)]
fn timeval_micros(tv: libc::timeval) -> u64 {
    let micros = i64::from(tv.tv_sec)
        .saturating_mul(1_000_000)
        .saturating_add(i64::from(tv.tv_usec));
    u64::try_from(micros).unwrap_or(0)
}

// TODO: read GetProcessTimes on Windows; counters stay at zero there for now.
#[cfg(not(unix))]
fn process_cpu_time() -> CpuUsage {
    CpuUsage::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;
    use std::time::{Duration, Instant};

    fn burn_cpu(duration: Duration) {
        let start = Instant::now();
        let mut acc = 0u64;
        while start.elapsed() < duration {
            for i in 0..10_000u64 {
                acc = black_box(acc.wrapping_mul(31).wrapping_add(i));
            }
        }
        black_box(acc);
    }

    #[test]
    fn test_process_sampler_reads_own_process() {
        let sampler = ProcessSampler::new();
        let snapshot = sampler.snapshot();

        assert!(snapshot.uptime >= 0.0);
        assert!(snapshot.memory_usage.rss > 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_cpu_time_grows_while_busy() {
        let sampler = ProcessSampler::new();
        let before = sampler.snapshot().cpu_usage;
        burn_cpu(Duration::from_millis(200));
        let after = sampler.snapshot().cpu_usage;

        assert!(after.user >= before.user);
        assert!(after.system >= before.system);
        // Leave room for a contended runner; a stuck counter reads 0
        assert!(
            after.total() - before.total() >= 20_000,
            "before {before:?}, after {after:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_cpu_time_does_not_depend_on_sampler() {
        burn_cpu(Duration::from_millis(50));
        let fresh = ProcessSampler::new().snapshot().cpu_usage;
        assert!(fresh.total() > 0);
    }

    #[test]
    fn test_uptime_is_process_uptime() {
        let first = ProcessSampler::new().snapshot().uptime;
        std::thread::sleep(Duration::from_millis(1_100));
        let late = ProcessSampler::new().snapshot().uptime;

        // A sampler created now still reports time since the process started
        assert!(late >= 1.0, "uptime {late}");
        assert!(late >= first);
    }

    #[test]
    fn test_snapshot_wire_names() {
        let json = serde_json::to_value(ResourceSnapshot::default()).unwrap();
        assert!(json.get("uptime").is_some());
        assert!(json["memoryUsage"].get("rss").is_some());
        assert!(json["memoryUsage"].get("virtualMemory").is_some());
        assert!(json["cpuUsage"].get("user").is_some());
        assert!(json["cpuUsage"].get("system").is_some());
    }
}
