//! Diagnostic reporting for flag resolution.
//!
//! The resolver never logs directly; it reports through a [`Diagnostics`]
//! implementation supplied by the caller.

use std::time::Duration;

use humantime::format_duration;

use crate::resolver::DEFAULT_METRICS_COLLECTION_INTERVAL;

/// The three inputs of the high-frequency decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencySummary {
    pub enhanced_enabled: bool,
    pub accelerated_enabled: bool,
    pub is_high_frequency: bool,
}

pub trait Diagnostics {
    /// Whether the GPU interval key was present, and the interval in effect.
    fn gpu_interval(&self, configured: bool, interval: Duration);

    fn high_frequency_summary(&self, summary: &FrequencySummary);
}

/// Reports through `tracing` at DEBUG level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn gpu_interval(&self, configured: bool, interval: Duration) {
        if configured {
            tracing::debug!(
                configured,
                "accelerated_compute_gpu_metrics_collection_interval exists with value: {}",
                format_duration(interval)
            );
        } else {
            tracing::debug!(
                configured,
                "accelerated_compute_gpu_metrics_collection_interval does not exist, using default: {}",
                format_duration(DEFAULT_METRICS_COLLECTION_INTERVAL)
            );
        }
    }

    fn high_frequency_summary(&self, summary: &FrequencySummary) {
        tracing::debug!(
            enhanced_enabled = summary.enhanced_enabled,
            accelerated_enabled = summary.accelerated_enabled,
            is_high_frequency = summary.is_high_frequency,
            "high frequency GPU metrics evaluated"
        );
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn gpu_interval(&self, _configured: bool, _interval: Duration) {}

    fn high_frequency_summary(&self, _summary: &FrequencySummary) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn gpu_interval(&self, configured: bool, interval: Duration) {
        (**self).gpu_interval(configured, interval)
    }

    fn high_frequency_summary(&self, summary: &FrequencySummary) {
        (**self).high_frequency_summary(summary)
    }
}
