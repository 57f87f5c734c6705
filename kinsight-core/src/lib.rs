//! # kinsight-core
//!
//! Derives container-insights feature flags from a [`kinsight_config::ConfigTree`]:
//! enhanced insights, accelerated-compute (GPU) metrics, the GPU collection
//! interval, and whether GPU metrics run at high frequency.
//!
//! Resolution never fails; missing or mistyped settings fall back to defaults.
//! Diagnostics go through an injected [`Diagnostics`] implementation.

pub mod diagnostics;
pub mod flags;
pub mod resolver;

pub use diagnostics::{Diagnostics, FrequencySummary, NoopDiagnostics, TracingDiagnostics};
pub use flags::ResolvedFlags;
pub use resolver::{
    accelerated_compute_metrics_enabled, enhanced_container_insights_enabled,
    gpu_metrics_collection_interval, high_frequency_gpu_metrics_enabled,
    BASE_CONTAINER_INSIGHTS_LEVEL, DEFAULT_METRICS_COLLECTION_INTERVAL,
};
