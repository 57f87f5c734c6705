//! Structured logging with `tracing`.
//!
//! `RUST_LOG` takes precedence over the configured level.

use kinsight_config::{AgentSettings, LogFormat};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Full,
        }
    }
}

impl LogConfig {
    pub fn from_settings(settings: &AgentSettings) -> Self {
        Self {
            level: settings.effective_level().to_lowercase(),
            format: settings.log_format,
        }
    }

    /// Replaces the level, e.g. with a command-line override.
    pub fn with_level(mut self, level: Option<&str>) -> Self {
        if let Some(level) = level {
            self.level = level.to_lowercase();
        }
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(config: &LogConfig) -> Result<(), TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    let builder = fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr);
    match config.format {
        LogFormat::Full => builder.finish().try_init(),
        LogFormat::Compact => builder.compact().finish().try_init(),
        LogFormat::Json => builder.json().finish().try_init(),
    }
}
