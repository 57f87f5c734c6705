//! # kinsight configuration tree
//!
//! Layered, read-only configuration for the container-insights agent.
//!
//! ## Features
//! - **Layered loading**: YAML/JSON files, inline sources and `KINSIGHT_*`
//!   environment variables merged with `figment`
//! - **Typed lookups**: [`ConfigTree`] returns `Option<T>` and leaves defaults
//!   to the caller
//! - **Validation**: agent settings are checked with `validator`

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod agent;
mod error;
pub mod keys;
mod loader;
mod tree;
mod validation;

pub use agent::AgentSettings;
pub use agent::LogFormat;
pub use error::ConfigError;
pub use keys::ConfigKey;
pub use loader::ConfigLoader;
pub use loader::SourceFormat;
pub use loader::DEFAULT_ENV_PREFIX;
pub use tree::ConfigTree;
pub use validation::LOG_LEVELS;

pub use figment::Figment;
