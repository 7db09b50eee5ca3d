//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; error rendering and extractors read it.
//! Code running outside a request sees `"unknown"`.

use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const UNKNOWN: &str = "unknown";

/// Trace id of the current task, if a request scope is active.
pub fn current() -> Option<String> {
    TRACE_ID.try_with(Clone::clone).ok()
}

pub fn trace_id() -> String {
    current().unwrap_or_else(|| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` visible to [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
