//! Configuration loading utilities

use crate::Config;
use bikeshare_common::Result as DashboardResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for bikeshare_common::DashboardError {
    fn from(err: ConfigError) -> Self {
        bikeshare_common::DashboardError::config_with_source("Failed to load configuration", err)
    }
}

/// Source of environment values; the process environment in production
pub trait EnvSource {
    /// Look up a variable, `None` when unset
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from `std::env`
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl<S: std::hash::BuildHasher> EnvSource for std::collections::HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with_env(path, &ProcessEnv)
    }

    /// Load configuration from a YAML file with overrides from `env`
    pub fn load_config_with_env<P: AsRef<Path>>(
        path: P,
        env: &impl EnvSource,
    ) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config, env)?;
        config.validate_all()?;

        debug!(path = %path.as_ref().display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from the environment, a default file, or defaults
    pub fn load() -> DashboardResult<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::load_config(&config_path)?
        } else if Path::new("dashboard.yaml").exists() {
            Self::load_config("dashboard.yaml")?
        } else if Path::new("dashboard.yml").exists() {
            Self::load_config("dashboard.yml")?
        } else {
            Self::defaults_with_env(&ProcessEnv)?
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DashboardResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Default configuration with environment overrides applied
    pub fn defaults_with_env(env: &impl EnvSource) -> Result<Config, ConfigError> {
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config, env)?;
        config.validate_all()?;
        Ok(config)
    }

    fn parse_var<T>(env: &impl EnvSource, var: &str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        env.var(var)
            .map(|raw| {
                raw.trim().parse().map_err(|e| ConfigError::EnvParseError {
                    var: var.to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config, env: &impl EnvSource) -> Result<(), ConfigError> {
        // Graph configuration overrides
        if let Some(width) = Self::parse_var(env, "GRAPH_WIDTH")? {
            config.graph.width = width;
        }

        if let Some(height) = Self::parse_var(env, "GRAPH_HEIGHT")? {
            config.graph.height = height;
        }

        if let Some(bg_color) = env.var("GRAPH_BACKGROUND_COLOR") {
            config.graph.background_color = bg_color;
        }

        if let Some(font_family) = env.var("GRAPH_FONT_FAMILY") {
            config.graph.font_family = font_family;
        }

        if let Some(show_grid) = Self::parse_var(env, "GRAPH_SHOW_GRID")? {
            config.graph.show_grid = show_grid;
        }

        // Output overrides
        if let Some(format) = env.var("DASHBOARD_OUTPUT_FORMAT") {
            config.output.format = format;
        }

        if let Some(html_path) = env.var("DASHBOARD_HTML_PATH") {
            config.output.html_path = Some(html_path);
        }

        if let Some(export_dir) = env.var("DASHBOARD_EXPORT_DIR") {
            config.output.export_dir = Some(export_dir);
        }

        // Logging configuration overrides
        if let Some(level) = env.var("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = env.var("LOG_FILE") {
            config.logging.file = Some(file);
        }

        if let Some(compact) = Self::parse_var(env, "LOG_COMPACT")? {
            config.logging.compact = compact;
        }

        Ok(())
    }
}
