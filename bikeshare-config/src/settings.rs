//! Application configuration structures

use bikeshare_common::DashboardError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Chart rendering settings
    pub graph: GraphSettings,

    /// Page output settings
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GraphSettings {
    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Font family for text rendering
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Font size for chart titles
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub title_font_size: u32,

    /// Whether to draw horizontal grid lines
    pub show_grid: bool,
}

/// Page output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Presenter used for the terminal ("text" or "json")
    #[validate(custom(function = "crate::validation::validate_output_format", message = "Output format must be one of: text, json"))]
    pub format: String,

    /// When set, every render pass also writes a self-contained HTML page here
    #[validate(custom(function = "crate::validation::validate_file_path", message = "HTML path contains invalid characters"))]
    pub html_path: Option<String>,

    /// When set, every chart is also written as a PNG file into this directory
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Export directory contains invalid characters"))]
    pub export_dir: Option<String>,

    /// Width in characters of the text bar tables
    #[validate(range(min = 10, max = 200, message = "Text bar width must be between 10 and 200"))]
    pub text_bar_width: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Optional log file path
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Log file path contains invalid characters"))]
    pub file: Option<String>,

    /// Use the compact single-line format
    pub compact: bool,

    /// Use the multi-line pretty format
    pub pretty: bool,
}

impl Config {
    /// Validate every section of the configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.graph.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Values given on the command line, applied over the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub html_path: Option<String>,
    pub export_dir: Option<String>,
}

impl Config {
    /// Apply command line overrides, then validate again so they obey the file rules
    pub fn apply_overrides(&mut self, overrides: CliOverrides) -> bikeshare_common::Result<()> {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(html_path) = overrides.html_path {
            self.output.html_path = Some(html_path);
        }
        if let Some(export_dir) = overrides.export_dir {
            self.output.export_dir = Some(export_dir);
        }

        self.validate_all().map_err(|errors| {
            DashboardError::config(format!("Invalid command line override: {errors}"))
        })
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            show_grid: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            html_path: None,
            export_dir: None,
            text_bar_width: 40,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            compact: false,
            pretty: false,
        }
    }
}

impl From<&LoggingSettings> for bikeshare_common::LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            compact_format: settings.compact,
            pretty_format: settings.pretty,
            file_path: settings.file.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.validate_all().is_ok());
        assert_eq!(config.graph.width, 1200);
        assert_eq!(config.output.format, "text");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();

        let yaml = serde_yaml::to_string(&config).expect("Failed to serialize to YAML");
        assert!(yaml.contains("graph:"));
        assert!(yaml.contains("output:"));
        assert!(yaml.contains("logging:"));

        let deserialized: Config = serde_yaml::from_str(&yaml).expect("Failed to deserialize from YAML");
        assert_eq!(config.graph.width, deserialized.graph.width);
        assert_eq!(config.output.text_bar_width, deserialized.output.text_bar_width);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("graph:\n  width: 900\n").unwrap();
        assert_eq!(config.graph.width, 900);
        assert_eq!(config.graph.height, 600);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn test_graph_settings_validation() {
        let mut settings = GraphSettings::default();
        assert!(settings.validate().is_ok());

        settings.width = 50;
        assert!(settings.validate().is_err());

        settings.width = 1200;
        settings.height = 5000;
        assert!(settings.validate().is_err());

        settings.height = 600;
        settings.background_color = "#GGGGGG".to_string();
        assert!(settings.validate().is_err());

        settings.background_color = "#000000".to_string();
        settings.title_font_size = 4;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_output_config_validation() {
        let mut output = OutputConfig::default();
        assert!(output.validate().is_ok());

        output.format = "xml".to_string();
        assert!(output.validate().is_err());

        output.format = "json".to_string();
        output.html_path = Some("report?.html".to_string());
        assert!(output.validate().is_err());

        output.html_path = Some("report.html".to_string());
        output.text_bar_width = 5;
        assert!(output.validate().is_err());
    }

    #[test]
    fn test_logging_settings_validation() {
        let mut logging = LoggingSettings::default();
        assert!(logging.validate().is_ok());

        logging.level = "loud".to_string();
        assert!(logging.validate().is_err());
    }

    #[test]
    fn test_overrides_are_applied() {
        let mut config = Config::default();
        config
            .apply_overrides(CliOverrides {
                log_level: Some("debug".to_string()),
                html_path: Some("out/dashboard.html".to_string()),
                export_dir: None,
            })
            .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.html_path.as_deref(), Some("out/dashboard.html"));
        assert!(config.output.export_dir.is_none());
    }

    #[test]
    fn test_unknown_log_level_override_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(CliOverrides {
                log_level: Some("loud".to_string()),
                ..CliOverrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));
        assert!(err.to_string().contains("Invalid command line override"));
    }

    #[test]
    fn test_bad_path_override_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(CliOverrides {
            export_dir: Some("charts?".to_string()),
            ..CliOverrides::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_logging_settings_conversion() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            file: Some("dashboard.log".to_string()),
            compact: true,
            pretty: false,
        };
        let config = bikeshare_common::LoggingConfig::from(&settings);
        assert_eq!(config.level, "debug");
        assert!(config.compact_format);
        assert_eq!(config.file_path.as_deref(), Some("dashboard.log"));
    }
}
