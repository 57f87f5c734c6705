//! # kinsight telemetry
//!
//! Logging setup for the agent binaries.

pub mod logging;

pub use logging::LogConfig;
