//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the tma-export configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  TMA Export Downsample: {}",
            config.preferences.tma_export_downsample
        );
        println!("  Core Manifest: {}", config.export.write_core_manifest);
        println!(
            "  Overlay Layers: {}",
            config.overlay.visible_layers().join(", ")
        );
        if config.logging.local_enabled {
            println!(
                "  File Log: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(EXIT_SUCCESS)
    }
}
