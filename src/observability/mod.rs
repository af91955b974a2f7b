// src/observability/mod.rs
//! Tracing and metrics initialization
//!
//! Host processes embedding the interception layer call these once at
//! startup. Both are idempotent; repeated initialization is a no-op so
//! racing init paths (the same paths that race `start()`) stay harmless.

use crate::utils::errors::{EngineError, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static TRACING: OnceCell<()> = OnceCell::new();
static METRICS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the tracing subscriber
///
/// Filter comes from `NETSHUNT_LOG`, falling back to `RUST_LOG`, falling back
/// to `info`.
pub fn init_tracing() -> Result<()> {
    TRACING.get_or_try_init(|| {
        let filter = EnvFilter::try_from_env("NETSHUNT_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| EngineError::ObservabilityError(e.to_string()))
    })?;
    Ok(())
}

/// Install the Prometheus metrics recorder
///
/// The returned handle renders the current metrics snapshot; host processes
/// expose it however they like (admin endpoint, periodic dump).
pub fn init_metrics() -> Result<PrometheusHandle> {
    METRICS
        .get_or_try_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| EngineError::ObservabilityError(e.to_string()))
        })
        .cloned()
}
