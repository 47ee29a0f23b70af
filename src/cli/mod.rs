//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for tma-export using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// tma-export - TMA data export with workflow recording
#[derive(Parser, Debug)]
#[command(name = "tma-export")]
#[command(version, about, long_about = None)]
#[command(author = "tma-export Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tma-export.toml", env = "TMA_EXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TMA_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export TMA data of an image and record the step in its history
    Export(commands::export::ExportArgs),

    /// Show the workflow history of an image
    History(commands::history::HistoryArgs),

    /// Replay a workflow script against an image
    Replay(commands::replay::ReplayArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
