//! Shared helpers for the backend's unit and integration tests: one-time
//! logging setup, problem-details assertions and unique ids.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
