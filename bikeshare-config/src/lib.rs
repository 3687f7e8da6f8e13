//! Configuration management for the bike sharing dashboard

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader, EnvSource, ProcessEnv, CONFIG_PATH_ENV};
pub use settings::{CliOverrides, Config, GraphSettings, LoggingSettings, OutputConfig};
