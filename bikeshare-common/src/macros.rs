//! Convenience macros for error handling and propagation

/// Equivalent to `anyhow::ensure!` but for `DashboardError`
///
/// # Examples
///
/// ```rust
/// use bikeshare_common::ensure;
/// use bikeshare_common::Result;
///
/// fn validate_hour(hour: u8) -> Result<()> {
///     ensure!(hour < 24, "Hour must be 0-23, got: {}", hour);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::DashboardError::new(format!($msg)));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($crate::DashboardError::new($err));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::DashboardError::new(format!($fmt, $($arg)*)));
        }
    };
}

/// Add context to an error while preserving the error chain
///
/// # Examples
///
/// ```rust
/// use bikeshare_common::{with_context, Result};
///
/// fn read_dataset(path: &str) -> Result<String> {
///     std::fs::read_to_string(path)
///         .map_err(|e| with_context!(e, "Failed to read dataset {}", path))
/// }
/// ```
#[macro_export]
macro_rules! with_context {
    ($err:expr, $msg:literal $(,)?) => {
        $crate::DashboardError::with_source(format!($msg), $err)
    };
    ($err:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::DashboardError::with_source(format!($fmt, $($arg)*), $err)
    };
}

#[cfg(test)]
mod tests {
    use crate::Result;

    #[test]
    fn test_ensure_macro() {
        fn test_function(value: i32) -> Result<()> {
            ensure!(value > 0, "Value must be positive: {}", value);
            Ok(())
        }

        assert!(test_function(5).is_ok());
        let error = test_function(-1).unwrap_err();
        assert!(error.to_string().contains("Value must be positive: -1"));
    }

    #[test]
    fn test_with_context_macro() {
        use std::error::Error;
        use std::io;

        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let contextual = with_context!(io_error, "Failed to open {}", "day_cleaned.csv");

        assert_eq!(contextual.to_string(), "Failed to open day_cleaned.csv");
        assert!(contextual.source().is_some());
    }
}
