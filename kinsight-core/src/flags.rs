//! Snapshot of every resolved flag.

use std::fmt;
use std::time::Duration;

use humantime::format_duration;
use kinsight_config::ConfigTree;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::resolver;

/// Flags derived from one configuration snapshot. Recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFlags {
    pub enhanced_insights_enabled: bool,
    pub accelerated_compute_enabled: bool,
    #[serde(with = "humantime_serde")]
    pub gpu_collection_interval: Duration,
    pub high_frequency_gpu_metrics_enabled: bool,
}

impl ResolvedFlags {
    /// Resolves all flags, reporting the high-frequency decision to `diagnostics`.
    pub fn resolve<T, D>(tree: &T, diagnostics: D) -> Self
    where
        T: ConfigTree + ?Sized,
        D: Diagnostics,
    {
        let (summary, high_frequency, interval) = resolver::evaluate(tree, &diagnostics);
        Self {
            enhanced_insights_enabled: summary.enhanced_enabled,
            accelerated_compute_enabled: summary.accelerated_enabled,
            gpu_collection_interval: interval,
            high_frequency_gpu_metrics_enabled: high_frequency,
        }
    }
}

impl fmt::Display for ResolvedFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "enhanced_insights_enabled:          {}", self.enhanced_insights_enabled)?;
        writeln!(f, "accelerated_compute_enabled:        {}", self.accelerated_compute_enabled)?;
        writeln!(
            f,
            "gpu_collection_interval:            {}",
            format_duration(self.gpu_collection_interval)
        )?;
        write!(
            f,
            "high_frequency_gpu_metrics_enabled: {}",
            self.high_frequency_gpu_metrics_enabled
        )
    }
}
