//! Client metrics collection.
//!
//! Provides standardized metrics for monitoring backend calls:
//! - Request counters by operation and status
//! - Latency histograms
//! - Session invalidation and unauthenticated-request counters

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total backend requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "skillbridge_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "skillbridge_request_latency_seconds";

    /// Sessions cleared because a response came back 401/403.
    pub const SESSION_INVALIDATIONS_TOTAL: &str = "skillbridge_session_invalidations_total";

    /// Requests sent without a bearer token.
    pub const UNAUTHENTICATED_REQUESTS_TOTAL: &str = "skillbridge_unauthenticated_requests_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record metrics for a completed request. Status 0 means no response.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

pub fn record_invalidation(status: u16) {
    counter!(
        names::SESSION_INVALIDATIONS_TOTAL,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_unauthenticated_request(operation: &str) {
    counter!(
        names::UNAUTHENTICATED_REQUESTS_TOTAL,
        "operation" => operation.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::REQUESTS_TOTAL.contains("requests"));
        assert!(names::LATENCY_SECONDS.contains("latency"));
        assert!(names::SESSION_INVALIDATIONS_TOTAL.contains("invalidations"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_request("list_vagas", 200, 12.0);
        record_invalidation(401);
        record_unauthenticated_request("list_vagas");
    }
}
