//! Error types and utilities for the dashboard

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or record decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed or inconsistent dataset contents
    #[error("Data error: {message}")]
    Data {
        message: String,
        /// Column the problem was found in, when known
        column: Option<String>,
        /// 1-based data row (header excluded), when known
        row: Option<usize>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DashboardError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            column: None,
            row: None,
        }
    }

    /// Create a new data error pinned to a column and row
    pub fn data_at(msg: impl Into<String>, column: impl Into<String>, row: usize) -> Self {
        Self::Data {
            message: msg.into(),
            column: Some(column.into()),
            row: Some(row),
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether the error came from reading the input datasets
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Csv(_) | Self::Data { .. })
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to DashboardError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for DashboardError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = DashboardError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = DashboardError::config("config issue");
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let data_error = DashboardError::data_at("not a date", "dteday", 4);
        assert_eq!(data_error.to_string(), "Data error: not a date");
        match data_error {
            DashboardError::Data { column, row, .. } => {
                assert_eq!(column.as_deref(), Some("dteday"));
                assert_eq!(row, Some(4));
            }
            other => panic!("expected data error, got {other:?}"),
        }

        let validation_error = DashboardError::validation_field("Invalid input", "start");
        assert!(validation_error.to_string().contains("Validation error"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped = DashboardError::with_source("Failed to read file", io_error);

        assert!(wrapped.to_string().contains("Failed to read file"));
        assert!(wrapped.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DashboardError = io_error.into();

        assert!(error.to_string().starts_with("I/O error"));
        assert!(error.is_input_error());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#).unwrap_err();
        let error: DashboardError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
        assert!(!error.is_input_error());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle = DashboardError::config_with_source("Middle layer", root);
        let top = DashboardError::with_source("Top layer", middle);

        let mut current: &dyn std::error::Error = &top;
        let mut depth = 0;
        while let Some(source) = current.source() {
            current = source;
            depth += 1;
        }
        assert_eq!(depth, 2);
    }
}
