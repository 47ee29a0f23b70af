//! Configuration schema types
//!
//! This module defines the configuration structure for tma-export.

use crate::adapters::ui::PreferenceSource;
use crate::domain::OverlayOptions;
use serde::{Deserialize, Serialize};

/// Main tma-export configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmaExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// User preferences read by commands
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Overlay options used when no viewer supplies its own
    #[serde(default)]
    pub overlay: OverlayOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TmaExportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.preferences.validate()?;
        self.overlay.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Persistent user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Downsample factor for exported TMA core data
    #[serde(default = "default_tma_export_downsample")]
    pub tma_export_downsample: f64,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            tma_export_downsample: default_tma_export_downsample(),
        }
    }
}

impl PreferencesConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.tma_export_downsample.is_finite() || self.tma_export_downsample <= 0.0 {
            return Err(format!(
                "preferences.tma_export_downsample must be a positive number, got {}",
                self.tma_export_downsample
            ));
        }
        Ok(())
    }
}

impl PreferenceSource for PreferencesConfig {
    fn tma_export_downsample(&self) -> f64 {
        self.tma_export_downsample
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Write a `-cores.json` manifest next to each export
    #[serde(default = "default_true")]
    pub write_core_manifest: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            write_core_manifest: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "size"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_tma_export_downsample() -> f64 {
    4.0
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_preferences_validation() {
        let mut prefs = PreferencesConfig::default();
        assert!(prefs.validate().is_ok());
        assert_eq!(prefs.tma_export_downsample(), 4.0);

        prefs.tma_export_downsample = 0.0;
        assert!(prefs.validate().is_err());

        prefs.tma_export_downsample = f64::NAN;
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "logs");
        assert_eq!(config.local_rotation, "daily");
        assert_eq!(config.local_max_size_mb, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_rejects_bad_rotation() {
        let config = LoggingConfig {
            local_rotation: "hourly".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("hourly"));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: TmaExportConfig = toml::from_str("").unwrap();
        assert_eq!(config, TmaExportConfig::default());
        assert!(config.export.write_core_manifest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlay_section_is_validated() {
        let config: TmaExportConfig = toml::from_str("[overlay]\nopacity = 2.0\n").unwrap();
        assert!(config.validate().unwrap_err().contains("opacity"));
    }
}
