use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use humantime::format_duration;
use kinsight_config::keys::{
    ACCELERATED_COMPUTE_GPU_METRICS_COLLECTION_INTERVAL, CONTAINER_INSIGHTS_METRIC_GRANULARITY,
    ENABLE_ACCELERATED_COMPUTE_METRIC, ENHANCED_CONTAINER_INSIGHTS,
};
use kinsight_config::{AgentSettings, ConfigKey, ConfigLoader, DEFAULT_ENV_PREFIX, LOG_LEVELS};
use kinsight_core::{
    ResolvedFlags, TracingDiagnostics, BASE_CONTAINER_INSIGHTS_LEVEL,
    DEFAULT_METRICS_COLLECTION_INTERVAL,
};
use kinsight_telemetry::logging::{self, LogConfig};

#[derive(Parser)]
#[command(name = "kinsight", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve feature flags from configuration files and environment
    Resolve(ResolveArgs),
    /// List the recognized container-insights keys and their defaults
    Keys,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Configuration files (YAML or JSON), later files override earlier ones
    #[arg(short, long = "config", value_name = "FILE")]
    pub configs: Vec<PathBuf>,
    /// Prefix of environment variables merged on top of the files
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    pub env_prefix: String,
    /// Ignore environment variables
    #[arg(long)]
    pub no_env: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Overrides the level from the `agent` section
    #[arg(long, value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Yaml,
}

pub fn run_command(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Resolve(args) => run_resolve(&args, out),
        Commands::Keys => run_keys(out),
    }
}

fn run_resolve(args: &ResolveArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new().files(&args.configs);
    loader = if args.no_env {
        loader.without_env()
    } else {
        loader.env_prefix(&args.env_prefix)
    };
    let tree = loader.load().context("failed to load configuration")?;

    let settings = AgentSettings::from_tree(&tree).context("invalid agent settings")?;
    let log_config = LogConfig::from_settings(&settings).with_level(args.log_level.as_deref());
    if let Err(e) = logging::init(&log_config) {
        eprintln!("logging already initialized: {e}");
    }
    tracing::debug!(files = args.configs.len(), "configuration loaded");

    let flags = ResolvedFlags::resolve(&tree, TracingDiagnostics);
    match args.format {
        OutputFormat::Text => writeln!(out, "{flags}")?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml::to_string(&flags)?)?,
    }
    Ok(())
}

fn run_keys(out: &mut impl Write) -> anyhow::Result<()> {
    let default_interval = format_duration(DEFAULT_METRICS_COLLECTION_INTERVAL).to_string();
    let base_level = BASE_CONTAINER_INSIGHTS_LEVEL.to_string();
    let rows = [
        (ENHANCED_CONTAINER_INSIGHTS, "bool", "unset"),
        (CONTAINER_INSIGHTS_METRIC_GRANULARITY, "number", base_level.as_str()),
        (ENABLE_ACCELERATED_COMPUTE_METRIC, "bool", "true"),
        (
            ACCELERATED_COMPUTE_GPU_METRICS_COLLECTION_INTERVAL,
            "duration",
            default_interval.as_str(),
        ),
    ];
    for (leaf, kind, default) in rows {
        writeln!(out, "{:<76} {:<8} {}", ConfigKey::kubernetes(leaf), kind, default)?;
    }
    Ok(())
}
