//! Configuration management for tma-export.
//!
//! # Overview
//!
//! tma-export reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TMA_EXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`PreferencesConfig`] - User preferences such as the export downsample
//! - [`ExportConfig`] - Export settings (core manifest)
//! - [`OverlayOptions`](crate::domain::OverlayOptions) - Overlay display options
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [preferences]
//! tma_export_downsample = 4.0
//!
//! [export]
//! write_core_manifest = true
//!
//! [logging]
//! local_enabled = true
//! local_path = "${HOME}/.tma-export/logs"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use tma_export::config::load_config;
//!
//! # fn example() {
//! match load_config("tma-export.toml") {
//!     Ok(config) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, LoggingConfig, PreferencesConfig, TmaExportConfig,
};
