//! Common utilities and types for the bike sharing dashboard

pub mod error;
pub mod logging;
pub mod macros;
pub mod utils;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use utils::{format_decimal, format_thousands, percentage};
