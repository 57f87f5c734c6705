//! Configuration key paths.
//!
//! Keys are dotted paths into the configuration tree, e.g.
//! `logs.metrics_collected.kubernetes.accelerated_compute_metrics_enabled`.

use std::fmt;

pub const LOGS_KEY: &str = "logs";
pub const METRICS_COLLECTED_KEY: &str = "metrics_collected";
pub const KUBERNETES_KEY: &str = "kubernetes";
pub const AGENT_KEY: &str = "agent";

pub const ENHANCED_CONTAINER_INSIGHTS: &str = "enhanced_container_insights_enabled";
pub const CONTAINER_INSIGHTS_METRIC_GRANULARITY: &str = "container_insights_metric_granularity";
pub const ENABLE_ACCELERATED_COMPUTE_METRIC: &str = "accelerated_compute_metrics_enabled";
pub const ACCELERATED_COMPUTE_GPU_METRICS_COLLECTION_INTERVAL: &str =
    "accelerated_compute_gpu_metrics_collection_interval";

const SEPARATOR: char = '.';

/// A dotted path addressing one node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Joins `segments` with `.`. Empty segments are skipped.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = String::new();
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                continue;
            }
            if !path.is_empty() {
                path.push(SEPARATOR);
            }
            path.push_str(segment);
        }
        Self(path)
    }

    /// Key of a leaf under `logs.metrics_collected.kubernetes`.
    pub fn kubernetes(leaf: &str) -> Self {
        Self::new([LOGS_KEY, METRICS_COLLECTED_KEY, KUBERNETES_KEY, leaf])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment.
    pub fn leaf(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or_default()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
