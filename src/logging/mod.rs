//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - Configurable log levels, overridable through `RUST_LOG`
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use tma_export::logging::init_logging;
//! use tma_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use tma_export::log_export_start;
/// use std::path::Path;
///
/// let path = Path::new("/out/block.qptma");
/// log_export_start!("block", path.display(), 4.0);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($image:expr, $path:expr, $downsample:expr) => {
        tracing::info!(
            image = %$image,
            path = %$path,
            downsample = $downsample,
            "Starting TMA export"
        );
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use tma_export::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!("/out/block.qptma", 12, Duration::from_millis(40));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($path:expr, $cores:expr, $duration:expr) => {
        tracing::info!(
            path = %$path,
            cores = $cores,
            duration_ms = $duration.as_millis(),
            "TMA export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use tma_export::log_error_with_context;
/// use tma_export::domain::TmaError;
///
/// let error = TmaError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
