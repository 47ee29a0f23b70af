//! History command implementation
//!
//! Prints the workflow history recorded in a project file.

use super::{EXIT_FATAL, EXIT_SUCCESS};
use crate::adapters::project::load_image_data;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Project file (JSON) to read
    #[arg(short, long)]
    pub image: PathBuf,

    /// Print only the replay script, one expression per line
    #[arg(long)]
    pub script: bool,
}

impl HistoryArgs {
    /// Execute the history command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let image_data = match load_image_data(&self.image) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("❌ Failed to open {}: {e}", self.image.display());
                return Ok(EXIT_FATAL);
            }
        };

        if self.script {
            print!("{}", image_data.history.to_script());
            return Ok(EXIT_SUCCESS);
        }

        println!("📜 Workflow history: {}", image_data.display_name());
        println!();

        if image_data.history.is_empty() {
            println!("  (no steps recorded)");
            return Ok(EXIT_SUCCESS);
        }

        for (i, step) in image_data.history.steps().iter().enumerate() {
            println!(
                "  {:>3}. [{}] {}",
                i + 1,
                step.timestamp().format("%Y-%m-%d %H:%M:%S UTC"),
                step.name()
            );
            println!("       {}", step.script());
        }
        println!();
        Ok(EXIT_SUCCESS)
    }
}
