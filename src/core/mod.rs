//! Core business logic for tma-export.
//!
//! # Modules
//!
//! - [`export`] - The TMA export command, destination resolution and reporting
//! - [`script`] - Encoding and parsing of workflow script expressions
//! - [`replay`] - Re-running recorded workflow scripts
//!
//! # Export Workflow
//!
//! 1. **Resolve viewer**: Ask the [`ViewerProvider`](crate::adapters::ui::ViewerProvider) for the active viewer
//! 2. **Check data**: Require a TMA grid with at least one core
//! 3. **Choose destination**: Prompt through a [`SaveFileDialog`](crate::adapters::ui::SaveFileDialog)
//! 4. **Write**: Delegate to a [`TmaDataWriter`](crate::adapters::tma_io::TmaDataWriter)
//! 5. **Record**: Append a replayable step to the image's workflow history
//!
//! # Example
//!
//! ```rust,no_run
//! use tma_export::adapters::ui::{ConsoleErrorReporter, StdinSaveDialog, ViewerSlot};
//! use tma_export::config::PreferencesConfig;
//! use tma_export::core::export::{ExportOutcome, TmaExportCommand};
//! use tma_export::domain::{share, ImageData, OverlayOptions, Viewer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let viewer = share(Viewer::new(ImageData::new("/slides/block.svs"), OverlayOptions::default()));
//!
//! let mut command = TmaExportCommand::builder()
//!     .viewers(ViewerSlot::with_viewer(viewer))
//!     .dialog(StdinSaveDialog)
//!     .errors(ConsoleErrorReporter)
//!     .preferences(PreferencesConfig::default())
//!     .build()?;
//!
//! if let ExportOutcome::Exported(summary) = command.execute()? {
//!     println!("Wrote {} cores to {}", summary.cores_written, summary.path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod replay;
pub mod script;
