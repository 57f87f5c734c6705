//! Agent-wide settings.
//!
//! The `agent` section sits next to `logs` in the same tree and controls how
//! the agent itself reports, not what it collects.

use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::keys::AGENT_KEY;
use crate::validation;
use crate::ConfigError;

/// Output format of the agent's own log lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

/// Agent settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AgentSettings {
    /// Forces debug-level logging.
    #[serde(default)]
    pub debug: bool,

    /// Log level used when `debug` is off.
    #[validate(custom(function = validation::validate_log_level))]
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl AgentSettings {
    /// Extracts and validates the `agent` section. A missing section yields defaults.
    pub fn from_tree(figment: &Figment) -> Result<Self, ConfigError> {
        let settings = match figment.extract_inner::<Self>(AGENT_KEY) {
            Ok(settings) => settings,
            Err(e) if e.missing() => Self::default(),
            Err(e) => return Err(e.into()),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// `debug` when debug is on, otherwise the configured level.
    pub fn effective_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }
}
