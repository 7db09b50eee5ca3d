#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod ranking;
pub mod realtime;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod trace_ctx;

// Re-exports for public API
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, Settings};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::request_trace::RequestTrace;
pub use state::app_state::AppState;
pub use store::SessionStore;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
