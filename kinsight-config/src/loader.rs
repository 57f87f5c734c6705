//! Layered configuration loading.
//!
//! Layers are merged in order, later layers winning:
//! 1. Configuration files, in the order given.
//! 2. Inline sources.
//! 3. Environment variables (`KINSIGHT_*` by default, nested keys split on `__`).

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Yaml},
    value::Dict,
    Figment,
};

use crate::ConfigError;

pub const DEFAULT_ENV_PREFIX: &str = "KINSIGHT_";

/// Serialization format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    files: Vec<PathBuf>,
    inline: Vec<(SourceFormat, String)>,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            inline: Vec::new(),
            env_prefix: Some(DEFAULT_ENV_PREFIX.into()),
        }
    }

    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    pub fn files<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().fold(self, |loader, path| loader.file(path))
    }

    pub fn inline(mut self, format: SourceFormat, content: impl Into<String>) -> Self {
        self.inline.push((format, content.into()));
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Merges all layers. Malformed sources fail here rather than at first lookup.
    pub fn load(&self) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new();

        for path in &self.files {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            figment = match SourceFormat::from_path(path) {
                Some(SourceFormat::Yaml) => figment.merge(Yaml::file(path)),
                Some(SourceFormat::Json) => figment.merge(Json::file(path)),
                None => return Err(ConfigError::UnsupportedFormat(path.clone())),
            };
            tracing::debug!(path = %path.display(), "merged configuration file");
        }

        for (format, content) in &self.inline {
            figment = match format {
                SourceFormat::Yaml => figment.merge(Yaml::string(content)),
                SourceFormat::Json => figment.merge(Json::string(content)),
            };
        }

        if let Some(prefix) = &self.env_prefix {
            figment = figment.merge(Env::prefixed(prefix).split("__"));
        }

        figment.extract::<Dict>()?;
        Ok(figment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keys, ConfigKey, ConfigTree};
    use figment::Jail;

    fn accelerated_key() -> ConfigKey {
        ConfigKey::kubernetes(keys::ENABLE_ACCELERATED_COMPUTE_METRIC)
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/agent.YML")),
            Some(SourceFormat::Yaml)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("agent.json")),
            Some(SourceFormat::Json)
        );
        assert_eq!(SourceFormat::from_path(Path::new("agent.toml")), None);
        assert_eq!(SourceFormat::from_path(Path::new("agent")), None);
    }

    #[test]
    fn later_files_override_earlier() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "base.yaml",
                "logs:\n  metrics_collected:\n    kubernetes:\n      accelerated_compute_metrics_enabled: true\n      container_insights_metric_granularity: 2\n",
            )?;
            jail.create_file(
                "override.json",
                r#"{"logs": {"metrics_collected": {"kubernetes": {"accelerated_compute_metrics_enabled": false}}}}"#,
            )?;

            let tree = ConfigLoader::new()
                .without_env()
                .files(["base.yaml", "override.json"])
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(tree.get_bool(&accelerated_key()), Some(false));
            let granularity = ConfigKey::kubernetes(keys::CONTAINER_INSIGHTS_METRIC_GRANULARITY);
            assert_eq!(tree.get_number(&granularity), Some(2.0));
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "agent.yaml",
                "logs:\n  metrics_collected:\n    kubernetes:\n      accelerated_compute_metrics_enabled: true\n",
            )?;
            jail.set_env(
                "KINSIGHT_LOGS__METRICS_COLLECTED__KUBERNETES__ACCELERATED_COMPUTE_METRICS_ENABLED",
                "false",
            );

            let tree = ConfigLoader::new()
                .file("agent.yaml")
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(tree.get_bool(&accelerated_key()), Some(false));
            Ok(())
        });
    }

    #[test]
    fn custom_prefix_and_disabled_env() {
        Jail::expect_with(|jail| {
            jail.set_env("CWA_AGENT__DEBUG", "true");

            let tree = ConfigLoader::new()
                .env_prefix("CWA_")
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(tree.get_bool(&ConfigKey::new(["agent", "debug"])), Some(true));

            let tree = ConfigLoader::new()
                .env_prefix("CWA_")
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;
            assert!(!tree.exists(&ConfigKey::new(["agent", "debug"])));
            Ok(())
        });
    }

    #[test]
    fn inline_sources_sit_above_files() {
        Jail::expect_with(|jail| {
            jail.create_file("agent.yaml", "agent:\n  debug: false\n")?;
            let tree = ConfigLoader::new()
                .without_env()
                .file("agent.yaml")
                .inline(SourceFormat::Json, r#"{"agent": {"debug": true}}"#)
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(tree.get_bool(&ConfigKey::new(["agent", "debug"])), Some(true));
            Ok(())
        });
    }

    #[test]
    fn missing_file() {
        Jail::expect_with(|_| {
            let err = ConfigLoader::new().file("absent.yaml").load().unwrap_err();
            assert!(matches!(err, ConfigError::FileNotFound(p) if p == Path::new("absent.yaml")));
            Ok(())
        });
    }

    #[test]
    fn unsupported_extension() {
        Jail::expect_with(|jail| {
            jail.create_file("agent.toml", "[agent]\n")?;
            let err = ConfigLoader::new().file("agent.toml").load().unwrap_err();
            assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
            Ok(())
        });
    }

    #[test]
    fn malformed_file_fails_at_load() {
        Jail::expect_with(|jail| {
            jail.create_file("broken.json", r#"{"logs": {"#)?;
            let err = ConfigLoader::new().file("broken.json").load().unwrap_err();
            assert!(matches!(err, ConfigError::Parsing(_)));
            Ok(())
        });
    }
}
