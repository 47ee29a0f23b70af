//! Replay command implementation
//!
//! Re-runs a workflow script, or the history recorded in the project itself,
//! against a project file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use crate::adapters::project::load_image_data;
use crate::adapters::tma_io::TmaSummaryWriter;
use crate::config::load_config_or_default;
use crate::core::replay::WorkflowReplayer;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the replay command
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Project file (JSON) to replay against
    #[arg(short, long)]
    pub image: PathBuf,

    /// Script file; defaults to the history recorded in the project
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

impl ReplayArgs {
    /// Execute the replay command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Configuration error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let image_data = match load_image_data(&self.image) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("❌ Failed to open {}: {e}", self.image.display());
                return Ok(EXIT_FATAL);
            }
        };

        let script = match &self.script {
            Some(path) => match fs::read_to_string(path) {
                Ok(script) => script,
                Err(e) => {
                    eprintln!("❌ Failed to read {}: {e}", path.display());
                    return Ok(EXIT_FATAL);
                }
            },
            None => image_data.history.to_script(),
        };

        let replayer = WorkflowReplayer::new(TmaSummaryWriter::new(
            config.export.write_core_manifest,
        ))
        .with_overlay_options(config.overlay.clone());

        println!("🔁 Replaying workflow for {}", image_data.display_name());
        let summary = match replayer.replay(&script, &image_data) {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("❌ Invalid workflow script: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        for path in &summary.written {
            println!("  ✅ {}", path.display());
        }
        for failure in &summary.failures {
            println!("  ❌ step {}: {}", failure.index + 1, failure.call);
            println!("     {}", failure.error);
        }
        println!();
        println!(
            "Executed: {}, skipped: {}, failed: {}",
            summary.executed,
            summary.skipped,
            summary.failures.len()
        );

        if summary.is_successful() {
            Ok(EXIT_SUCCESS)
        } else {
            Ok(EXIT_FATAL)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::project::save_image_data;
    use crate::domain::{Hierarchy, ImageData, TmaGrid};

    #[test]
    fn test_replay_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("block.json");
        let mut data = ImageData::new("/slides/block.svs")
            .with_hierarchy(Hierarchy::with_grid(TmaGrid::with_default_labels(2, 2, 10.0, 8.0)));
        save_image_data(&project, &mut data).unwrap();

        let out = dir.path().join("replayed");
        let script = dir.path().join("steps.txt");
        fs::write(
            &script,
            format!("exportTMAData(\"{}\", 1.0)\n", out.display().to_string().replace('\\', "\\\\")),
        )
        .unwrap();

        let args = ReplayArgs {
            image: project,
            script: Some(script),
        };
        let config = dir.path().join("absent.toml");
        assert_eq!(args.execute(config.to_str().unwrap()).unwrap(), EXIT_SUCCESS);
        assert!(out.join("block.qptma").is_file());
    }
}
