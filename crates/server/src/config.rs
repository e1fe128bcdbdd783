// Server configuration
//
// Everything is read from the environment (after loading .env if present).
// The workloads crate itself takes no configuration.

use axum::http::HeaderValue;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str =
    "hostbench_server=debug,hostbench_workloads=debug,tower_http=debug";

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind (e.g., "0.0.0.0:3000")
    pub bind_addr: String,
    /// Prefix for workload routes (e.g., "/api"); empty for none
    pub api_prefix: String,
    /// Origins allowed by CORS; empty disables the CORS layer
    pub cors_origins: Vec<HeaderValue>,
    /// Log filter directive
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_prefix: String::new(),
            cors_origins: Vec::new(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `BIND_ADDR`: Listen address (default: "0.0.0.0:3000")
    /// - `API_PREFIX`: Prefix for workload routes (default: none)
    /// - `CORS_ALLOWED_ORIGINS`: Comma-separated origins (default: CORS disabled)
    /// - `RUST_LOG`: Log filter
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (extracted for testing)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            bind_addr: lookup("BIND_ADDR")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            api_prefix: lookup("API_PREFIX")
                .map(|s| normalize_prefix(&s))
                .unwrap_or_default(),
            cors_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or_default(),
            log_filter: lookup("RUST_LOG")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.log_filter),
        }
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.api_prefix, "");
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("API_PREFIX", "bench/"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example.com, https://b.example.com,"),
            ("RUST_LOG", "info"),
        ]);

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/bench");
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[("BIND_ADDR", "  "), ("API_PREFIX", "/"), ("RUST_LOG", "")]);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.api_prefix, "");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
