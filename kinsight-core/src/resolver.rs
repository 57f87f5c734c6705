//! Feature-flag resolution for container insights and GPU metrics.
//!
//! All lookups fall back to defaults, so none of these functions can fail.

use std::time::Duration;

use kinsight_config::keys::{
    ACCELERATED_COMPUTE_GPU_METRICS_COLLECTION_INTERVAL, CONTAINER_INSIGHTS_METRIC_GRANULARITY,
    ENABLE_ACCELERATED_COMPUTE_METRIC, ENHANCED_CONTAINER_INSIGHTS,
};
use kinsight_config::{ConfigKey, ConfigTree};

use crate::diagnostics::{Diagnostics, FrequencySummary};

/// Granularity of plain container insights. Anything above it is enhanced.
pub const BASE_CONTAINER_INSIGHTS_LEVEL: f64 = 1.0;

/// Baseline collection interval. GPU intervals below it are high frequency.
pub const DEFAULT_METRICS_COLLECTION_INTERVAL: Duration = Duration::from_secs(60);

/// Whether enhanced container insights is on.
///
/// An explicit `enhanced_container_insights_enabled` wins. Otherwise a legacy
/// `container_insights_metric_granularity` above the base level enables it.
pub fn enhanced_container_insights_enabled<T: ConfigTree + ?Sized>(tree: &T) -> bool {
    if let Some(enabled) = tree.get_bool(&ConfigKey::kubernetes(ENHANCED_CONTAINER_INSIGHTS)) {
        return enabled;
    }
    let granularity = tree
        .get_number(&ConfigKey::kubernetes(CONTAINER_INSIGHTS_METRIC_GRANULARITY))
        .unwrap_or(BASE_CONTAINER_INSIGHTS_LEVEL);
    granularity > BASE_CONTAINER_INSIGHTS_LEVEL
}

/// Accelerated-compute metrics are on unless explicitly disabled.
pub fn accelerated_compute_metrics_enabled<T: ConfigTree + ?Sized>(tree: &T) -> bool {
    tree.get_bool(&ConfigKey::kubernetes(ENABLE_ACCELERATED_COMPUTE_METRIC))
        .unwrap_or(true)
}

pub fn gpu_metrics_collection_interval<T: ConfigTree + ?Sized>(tree: &T) -> Duration {
    tree.get_duration(&[ConfigKey::kubernetes(
        ACCELERATED_COMPUTE_GPU_METRICS_COLLECTION_INTERVAL,
    )])
    .unwrap_or(DEFAULT_METRICS_COLLECTION_INTERVAL)
}

/// Whether GPU metrics should be collected faster than the baseline interval.
///
/// Requires enhanced insights, accelerated-compute metrics and an interval
/// strictly below [`DEFAULT_METRICS_COLLECTION_INTERVAL`]. Presence of the
/// interval key is reported to `diagnostics` but does not affect the result.
pub fn high_frequency_gpu_metrics_enabled<T, D>(tree: &T, diagnostics: D) -> bool
where
    T: ConfigTree + ?Sized,
    D: Diagnostics,
{
    evaluate(tree, &diagnostics).1
}

/// Shared by [`high_frequency_gpu_metrics_enabled`] and `ResolvedFlags::resolve`.
pub(crate) fn evaluate<T, D>(tree: &T, diagnostics: &D) -> (FrequencySummary, bool, Duration)
where
    T: ConfigTree + ?Sized,
    D: Diagnostics + ?Sized,
{
    let enhanced_enabled = enhanced_container_insights_enabled(tree);
    let accelerated_enabled = accelerated_compute_metrics_enabled(tree);

    let interval_key = ConfigKey::kubernetes(ACCELERATED_COMPUTE_GPU_METRICS_COLLECTION_INTERVAL);
    let configured = tree.exists(&interval_key);

    let interval = gpu_metrics_collection_interval(tree);
    let is_high_frequency = interval < DEFAULT_METRICS_COLLECTION_INTERVAL;

    let summary = FrequencySummary {
        enhanced_enabled,
        accelerated_enabled,
        is_high_frequency,
    };
    diagnostics.gpu_interval(configured, interval);
    diagnostics.high_frequency_summary(&summary);

    let enabled = enhanced_enabled && accelerated_enabled && is_high_frequency;
    (summary, enabled, interval)
}
