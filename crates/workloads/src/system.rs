//! Host and process description

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::resources::{CpuUsage, MemoryUsage, ResourceSnapshot};

/// Static facts about the host plus a resource snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    #[cfg_attr(feature = "openapi", schema(example = "linux"))]
    pub platform: String,
    #[cfg_attr(feature = "openapi", schema(example = "x86_64"))]
    pub arch: String,
    #[cfg_attr(feature = "openapi", schema(example = "rust"))]
    pub runtime: String,
    pub version: String,
    /// Seconds
    pub uptime: f64,
    pub memory_usage: MemoryUsage,
    pub cpu_usage: CpuUsage,
    pub timestamp: DateTime<Utc>,
}

impl SystemInfo {
    /// Describe this host; `version` is the calling service's version
    pub fn collect(version: &str, snapshot: ResourceSnapshot) -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            runtime: "rust".to_string(),
            version: version.to_string(),
            uptime: snapshot.uptime,
            memory_usage: snapshot.memory_usage,
            cpu_usage: snapshot.cpu_usage,
            timestamp: Utc::now(),
        }
    }
}
