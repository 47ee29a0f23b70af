//! Export command implementation
//!
//! This module implements the `export` command: it opens a project file as
//! the active viewer, runs the TMA export command against it and saves the
//! updated workflow history back to the project.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_NO_TMA_DATA, EXIT_SUCCESS};
use crate::adapters::project::{load_image_data, save_image_data};
use crate::adapters::tma_io::TmaSummaryWriter;
use crate::adapters::ui::{ConsoleErrorReporter, FixedPathDialog, StdinSaveDialog, ViewerSlot};
use crate::config::load_config_or_default;
use crate::core::export::{ExportOutcome, TmaExportCommand};
use crate::domain::{share, SharedViewer, TmaError, Viewer};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project file (JSON) of the image to export
    #[arg(short, long)]
    pub image: PathBuf,

    /// Destination file; prompts on stdin when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the configured downsample factor
    #[arg(long)]
    pub downsample: Option<f64>,

    /// Do not write the updated history back to the project file
    #[arg(long)]
    pub no_save: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(image = %self.image.display(), "Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Configuration error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if let Some(downsample) = self.downsample {
            tracing::info!(downsample, "Overriding downsample from CLI");
            config.preferences.tma_export_downsample = downsample;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let image_data = match load_image_data(&self.image) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open project");
                eprintln!("❌ Failed to open {}: {e}", self.image.display());
                return Ok(EXIT_FATAL);
            }
        };

        let viewer = share(Viewer::new(image_data, config.overlay.clone()));

        let builder = TmaExportCommand::builder()
            .viewers(ViewerSlot::with_viewer(viewer.clone()))
            .errors(ConsoleErrorReporter)
            .preferences(config.preferences.clone())
            .writer(TmaSummaryWriter::new(config.export.write_core_manifest));
        let builder = match &self.output {
            Some(path) => builder.dialog(FixedPathDialog::new(Some(path.clone()))),
            None => builder.dialog(StdinSaveDialog),
        };
        let mut command = builder.build()?;

        match command.execute() {
            Ok(ExportOutcome::Exported(summary)) => {
                summary.log_summary();
                println!("✅ Exported {} cores", summary.cores_written);
                println!("   File: {}", summary.path.display());
                if let Some(manifest) = &summary.manifest {
                    println!("   Manifest: {}", manifest.display());
                }
                println!("   SHA-256: {}", summary.checksum);
                println!("   Recorded: {}", summary.replay_expression);

                if !self.no_save {
                    self.save_project(&viewer)?;
                }
                Ok(EXIT_SUCCESS)
            }
            Ok(ExportOutcome::Cancelled) => {
                println!("Export cancelled.");
                Ok(EXIT_SUCCESS)
            }
            Ok(ExportOutcome::NoTmaData | ExportOutcome::NoViewer) => Ok(EXIT_NO_TMA_DATA),
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                Ok(EXIT_FATAL)
            }
        }
    }

    fn save_project(&self, viewer: &SharedViewer) -> anyhow::Result<()> {
        let mut guard = viewer
            .lock()
            .map_err(|_| TmaError::State("Viewer lock poisoned".to_string()))?;
        if let Some(image_data) = guard.image_data.as_mut() {
            save_image_data(&self.image, image_data)?;
            println!("   Project updated: {}", self.image.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_export_args_parse() {
        let cli = Cli::parse_from([
            "tma-export",
            "export",
            "--image",
            "block.json",
            "--output",
            "/out/block",
            "--downsample",
            "2",
            "--no-save",
        ]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.image, PathBuf::from("block.json"));
        assert_eq!(args.output, Some(PathBuf::from("/out/block")));
        assert_eq!(args.downsample, Some(2.0));
        assert!(args.no_save);
    }

    #[test]
    fn test_missing_project_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            image: dir.path().join("missing.json"),
            output: Some(dir.path().join("out")),
            downsample: None,
            no_save: true,
        };
        let config = dir.path().join("absent.toml");
        assert_eq!(args.execute(config.to_str().unwrap()).unwrap(), EXIT_FATAL);
    }

    #[test]
    fn test_invalid_downsample_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            image: dir.path().join("block.json"),
            output: None,
            downsample: Some(-1.0),
            no_save: true,
        };
        let config = dir.path().join("absent.toml");
        assert_eq!(
            args.execute(config.to_str().unwrap()).unwrap(),
            EXIT_CONFIG_ERROR
        );
    }
}
