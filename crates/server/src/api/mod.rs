// HTTP API routes
//
// Each submodule handles one group of routes with its own AppState.

pub mod common;
pub mod system;
pub mod workloads;

// Re-export common types
pub use common::{ApiError, ErrorResponse};
