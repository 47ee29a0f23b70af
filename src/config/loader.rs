//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TmaExportConfig;
use crate::domain::errors::TmaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "TMA_EXPORT";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TmaExportConfig
/// 4. Applies environment variable overrides (TMA_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use tma_export::config::loader::load_config;
///
/// let config = load_config("tma-export.toml").expect("Failed to load config");
/// println!("Downsample: {}", config.preferences.tma_export_downsample);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TmaExportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TmaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TmaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads the file at `path` if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<TmaExportConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = TmaExportConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<TmaExportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: TmaExportConfig = toml::from_str(&contents)
        .map_err(|e| TmaError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &TmaExportConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| TmaError::Configuration(format!("Configuration validation failed: {}", e)))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TmaError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TmaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads `TMA_EXPORT_<key>` and parses it
fn env_override<T: FromStr>(key: &str) -> Result<Option<T>> {
    let name = format!("{}_{}", ENV_PREFIX, key);
    match std::env::var(&name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            TmaError::Configuration(format!("Invalid value '{}' for {}", val, name))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using TMA_EXPORT_* prefix
///
/// Environment variables follow the pattern: TMA_EXPORT_<SECTION>_<KEY>
/// For example: TMA_EXPORT_PREFERENCES_TMA_EXPORT_DOWNSAMPLE
fn apply_env_overrides(config: &mut TmaExportConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL")? {
        config.application.log_level = val;
    }

    // Preference overrides
    if let Some(val) = env_override("PREFERENCES_TMA_EXPORT_DOWNSAMPLE")? {
        config.preferences.tma_export_downsample = val;
    }

    // Export overrides
    if let Some(val) = env_override("EXPORT_WRITE_CORE_MANIFEST")? {
        config.export.write_core_manifest = val;
    }

    // Overlay overrides
    if let Some(val) = env_override("OVERLAY_SHOW_TMA_GRID")? {
        config.overlay.show_tma_grid = val;
    }
    if let Some(val) = env_override("OVERLAY_SHOW_TMA_CORE_LABELS")? {
        config.overlay.show_tma_core_labels = val;
    }
    if let Some(val) = env_override("OVERLAY_SHOW_ANNOTATIONS")? {
        config.overlay.show_annotations = val;
    }
    if let Some(val) = env_override("OVERLAY_SHOW_DETECTIONS")? {
        config.overlay.show_detections = val;
    }
    if let Some(val) = env_override("OVERLAY_FILL_DETECTIONS")? {
        config.overlay.fill_detections = val;
    }
    if let Some(val) = env_override("OVERLAY_OPACITY")? {
        config.overlay.opacity = val;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH")? {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION")? {
        config.logging.local_rotation = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_MAX_SIZE_MB")? {
        config.logging.local_max_size_mb = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TMA_LOADER_TEST_VAR", "test_value");
        let input = "local_path = \"${TMA_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "local_path = \"test_value\"\n");
        std::env::remove_var("TMA_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("TMA_LOADER_MISSING_VAR");
        let input = "local_path = \"${TMA_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("TMA_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# local_path = \"${TMA_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(TmaError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[preferences]
tma_export_downsample = 8.0

[export]
write_core_manifest = false

[overlay]
show_detections = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.preferences.tma_export_downsample, 8.0);
        assert!(!config.export.write_core_manifest);
        assert!(!config.overlay.show_detections);
        assert!(config.overlay.show_tma_grid);
    }

    #[test]
    fn test_parse_config_rejects_invalid_values() {
        let err = parse_config("[preferences]\ntma_export_downsample = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("tma_export_downsample"));
    }
}
