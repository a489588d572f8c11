//! Metrics collection and Prometheus export.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() -> Result<(), anyhow::Error> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;
    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Count one completed entity operation, labelled by outcome.
pub fn record_entity_operation(operation: &'static str, status: u16) {
    counter!(
        "entity_http_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_db_query(operation: &'static str, duration: Duration) {
    histogram!("entity_db_query_duration_seconds", "operation" => operation)
        .record(duration.as_secs_f64());
}

pub fn record_auth_rejection(reason: &'static str) {
    counter!("entity_auth_rejections_total", "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_harmless() {
        record_entity_operation("list", 200);
        record_db_query("list", Duration::from_millis(3));
        record_auth_rejection("missing_token");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_metrics().unwrap();
        init_metrics().unwrap();
        record_auth_rejection("invalid_token");
        assert!(get_metrics().contains("entity_auth_rejections_total"));
    }
}
