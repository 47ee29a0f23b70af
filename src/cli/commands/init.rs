//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "tma-export.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing tma-export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: tma-export validate-config");
                println!("  3. Run export: tma-export export --image <project.json>");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# tma-export Configuration File

[application]
log_level = "info"

[preferences]
tma_export_downsample = 4.0

[export]
write_core_manifest = true
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# tma-export Configuration File
#
# Any value can reference an environment variable with ${VAR_NAME}, and be
# overridden with TMA_EXPORT_<SECTION>_<KEY>, e.g.
# TMA_EXPORT_PREFERENCES_TMA_EXPORT_DOWNSAMPLE=2.0

[application]
# trace | debug | info | warn | error
log_level = "info"

[preferences]
# Core coordinates in the manifest are divided by this factor.
# Must be a positive number.
tma_export_downsample = 4.0

[export]
# Write <name>-cores.json next to every export
write_core_manifest = true

[overlay]
# Overlay layers listed in the core manifest
show_tma_grid = true
show_tma_core_labels = true
show_annotations = true
show_detections = true
fill_detections = false
opacity = 1.0

[logging]
# JSON file logging in addition to the console
local_enabled = false
local_path = "logs"
# daily | size
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }
}
