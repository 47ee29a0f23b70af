// tma-export - TMA data export with workflow recording
// Copyright (c) 2025 tma-export Contributors
// Licensed under the MIT License

//! # tma-export - TMA data export with workflow recording
//!
//! tma-export writes the tissue microarray (TMA) data of an image to a
//! `.qptma` file and records the export as a replayable step in the image's
//! workflow history.
//!
//! ## Overview
//!
//! This library provides:
//! - **Exporting** TMA data of the active viewer through
//!   [`core::export::TmaExportCommand`]
//! - **Recording** each export as a script expression such as
//!   `exportTMAData("/data/out", 4.0)`
//! - **Replaying** recorded scripts with [`core::replay::WorkflowReplayer`]
//! - **Persisting** image data and its history as JSON project files
//!
//! ## Architecture
//!
//! tma-export follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export command, script encoding, replay)
//! - [`adapters`] - UI collaborators, TMA data writer, project files
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tma_export::adapters::project::load_image_data;
//! use tma_export::adapters::ui::{ConsoleErrorReporter, FixedPathDialog, ViewerSlot};
//! use tma_export::config::load_config_or_default;
//! use tma_export::core::export::{ExportOutcome, TmaExportCommand};
//! use tma_export::domain::{share, Viewer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("tma-export.toml")?;
//!     let image = load_image_data("block_1.json")?;
//!     let viewer = share(Viewer::new(image, config.overlay.clone()));
//!
//!     let mut command = TmaExportCommand::builder()
//!         .viewers(ViewerSlot::with_viewer(viewer))
//!         .dialog(FixedPathDialog::new(Some("out/block_1".into())))
//!         .errors(ConsoleErrorReporter)
//!         .preferences(config.preferences.clone())
//!         .build()?;
//!
//!     if let ExportOutcome::Exported(summary) = command.execute()? {
//!         println!("Recorded {}", summary.replay_expression);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The library uses [`domain::TmaError`] for all errors; the CLI wraps them
//! in `anyhow`:
//!
//! ```rust,no_run
//! use tma_export::domain::TmaError;
//!
//! fn example() -> Result<(), TmaError> {
//!     let config = tma_export::config::load_config("tma-export.toml")?;
//!     println!("{}", config.preferences.tma_export_downsample);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! tma-export uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(path = "/data/out/block.qptma", "Starting TMA export");
//! warn!("No TMA data available for export");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
