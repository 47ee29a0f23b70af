//! TMA export command
//!
//! [`TmaExportCommand`] exports the TMA data of the image in the active
//! viewer and records a replayable step in the image's workflow history.
//! Every interaction with the outside world goes through the collaborator
//! traits in [`crate::adapters::ui`] and [`crate::adapters::tma_io`].

use super::destination::{
    absolute_directory, default_directory, ensure_extension, parent_directory,
    TMA_DATA_EXTENSION, TMA_DATA_FORMAT_LABEL,
};
use super::summary::{ExportOutcome, ExportSummary};
use crate::adapters::tma_io::{TmaDataWriter, TmaSummaryWriter};
use crate::adapters::ui::{
    ErrorReporter, PreferenceSource, SaveFileDialog, SaveFileRequest, ViewerProvider,
};
use crate::core::script::{ScriptCall, ScriptValue};
use crate::domain::{ImageData, Result, SharedViewer, TmaError, Viewer, WorkflowStep};
use crate::{log_error_with_context, log_export_complete, log_export_start};
use std::path::{Path, PathBuf};
use std::sync::MutexGuard;
use std::time::Instant;

/// Name of the workflow step recorded for an export
pub const EXPORT_STEP_NAME: &str = "Export TMA data";

/// Script function that replays an export
pub const EXPORT_FUNCTION: &str = "exportTMAData";

/// Title of every error shown by the command
pub const EXPORT_ERROR_TITLE: &str = "TMA export error";

/// Message shown when the image has nothing to export
pub const NO_TMA_DATA_MESSAGE: &str = "No TMA data available!";

/// Builds the replay call for an export to `directory`
///
/// ```rust
/// use std::path::Path;
/// use tma_export::core::export::export_call;
///
/// let call = export_call(Path::new("/data/out"), 4.0).unwrap();
/// assert_eq!(call.to_string(), r#"exportTMAData("/data/out", 4.0)"#);
/// ```
///
/// # Errors
///
/// Returns [`TmaError::Validation`] if `directory` is not valid UTF-8, since
/// the script could not reproduce it.
pub fn export_call(directory: &Path, downsample: f64) -> Result<ScriptCall> {
    let directory = directory.to_str().ok_or_else(|| {
        TmaError::Validation(format!(
            "Export directory is not valid UTF-8: {}",
            directory.display()
        ))
    })?;
    Ok(ScriptCall::new(EXPORT_FUNCTION)
        .arg(ScriptValue::string(directory))
        .arg(ScriptValue::number(downsample)))
}

/// Exports TMA data from the active viewer
///
/// Holds the directory of the last successful export for the lifetime of the
/// command so that consecutive exports open in the same place.
pub struct TmaExportCommand {
    viewers: Box<dyn ViewerProvider>,
    dialog: Box<dyn SaveFileDialog>,
    errors: Box<dyn ErrorReporter>,
    preferences: Box<dyn PreferenceSource>,
    writer: Box<dyn TmaDataWriter>,
    last_directory: Option<PathBuf>,
}

impl TmaExportCommand {
    /// Starts building a command
    pub fn builder() -> TmaExportCommandBuilder {
        TmaExportCommandBuilder::default()
    }

    /// Directory of the last successful export, if any
    pub fn last_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref()
    }

    /// Runs the export once
    ///
    /// # Errors
    ///
    /// Returns [`TmaError::Write`] if the writer fails; the user has already
    /// been shown the error and neither the history nor the last directory
    /// changed. Returns [`TmaError::State`] if the viewer lock is poisoned.
    pub fn execute(&mut self) -> Result<ExportOutcome> {
        let Some(viewer) = self.viewers.current_viewer() else {
            tracing::debug!("TMA export requested without an active viewer");
            return Ok(ExportOutcome::NoViewer);
        };

        // Snapshot what the dialog needs, then release the lock while it is open
        let snapshot = lock(&viewer)?
            .image_data
            .as_ref()
            .filter(|data| has_tma_data(data))
            .map(|data| (data.display_name(), data.last_saved_path.clone()));
        let Some((default_name, last_saved_path)) = snapshot else {
            return Ok(self.report_no_tma_data());
        };

        let request = SaveFileRequest {
            title: None,
            default_directory: default_directory(
                self.last_directory.as_deref(),
                last_saved_path.as_deref(),
            ),
            default_name,
            format_label: TMA_DATA_FORMAT_LABEL.to_string(),
            extension: TMA_DATA_EXTENSION.to_string(),
        };

        let Some(chosen) = self.dialog.prompt_to_save_file(&request) else {
            tracing::debug!("TMA export cancelled");
            return Ok(ExportOutcome::Cancelled);
        };
        let path = ensure_extension(chosen, TMA_DATA_EXTENSION);
        let directory = absolute_directory(&parent_directory(&path))?;
        let downsample = self.preferences.tma_export_downsample();
        let replay_expression = match export_call(&directory, downsample) {
            Ok(call) => call.to_string(),
            Err(e) => {
                log_error_with_context!(&e, "Cannot record TMA export");
                self.errors.show_error(EXPORT_ERROR_TITLE, &e.to_string());
                return Err(e);
            }
        };

        let mut guard = lock(&viewer)?;
        let Viewer {
            image_data,
            overlay_options,
        } = &mut *guard;
        let Some(image_data) = image_data.as_mut().filter(|data| has_tma_data(data)) else {
            return Ok(self.report_no_tma_data());
        };

        log_export_start!(image_data.display_name(), path.display(), downsample);
        let started = Instant::now();

        let report =
            match self
                .writer
                .write_tma_data(&path, image_data, overlay_options, downsample)
            {
                Ok(report) => report,
                Err(e) => {
                    drop(guard);
                    log_error_with_context!(&e, "Writing TMA data failed");
                    self.errors.show_error(EXPORT_ERROR_TITLE, &e.to_string());
                    return Err(match e {
                        TmaError::Write(msg) => TmaError::Write(msg),
                        other => TmaError::Write(other.to_string()),
                    });
                }
            };

        image_data.history.add_step(WorkflowStep::scriptable(
            EXPORT_STEP_NAME,
            replay_expression.clone(),
        ));
        drop(guard);

        self.last_directory = Some(directory.clone());

        let duration = started.elapsed();
        log_export_complete!(report.path.display(), report.cores_written, duration);

        Ok(ExportOutcome::Exported(ExportSummary {
            path: report.path,
            directory,
            downsample,
            cores_written: report.cores_written,
            manifest: report.manifest,
            checksum: report.checksum,
            replay_expression,
            duration,
        }))
    }

    fn report_no_tma_data(&self) -> ExportOutcome {
        tracing::warn!("No TMA data available for export");
        self.errors.show_error(EXPORT_ERROR_TITLE, NO_TMA_DATA_MESSAGE);
        ExportOutcome::NoTmaData
    }
}

impl std::fmt::Debug for TmaExportCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmaExportCommand")
            .field("last_directory", &self.last_directory)
            .finish_non_exhaustive()
    }
}

/// Image data is exportable when it has a non-empty hierarchy whose TMA grid
/// holds at least one core
fn has_tma_data(image_data: &ImageData) -> bool {
    image_data
        .hierarchy
        .as_ref()
        .filter(|hierarchy| !hierarchy.is_empty())
        .and_then(|hierarchy| hierarchy.tma_grid())
        .is_some_and(|grid| grid.n_cores() > 0)
}

fn lock(viewer: &SharedViewer) -> Result<MutexGuard<'_, Viewer>> {
    viewer
        .lock()
        .map_err(|_| TmaError::State("Viewer lock poisoned".to_string()))
}

/// Builder for [`TmaExportCommand`]
///
/// The viewer provider, save dialog, error reporter and preference source are
/// required. The writer defaults to [`TmaSummaryWriter`].
#[derive(Default)]
pub struct TmaExportCommandBuilder {
    viewers: Option<Box<dyn ViewerProvider>>,
    dialog: Option<Box<dyn SaveFileDialog>>,
    errors: Option<Box<dyn ErrorReporter>>,
    preferences: Option<Box<dyn PreferenceSource>>,
    writer: Option<Box<dyn TmaDataWriter>>,
    last_directory: Option<PathBuf>,
}

impl TmaExportCommandBuilder {
    /// Set the viewer provider
    pub fn viewers(mut self, viewers: impl ViewerProvider + 'static) -> Self {
        self.viewers = Some(Box::new(viewers));
        self
    }

    /// Set the save dialog
    pub fn dialog(mut self, dialog: impl SaveFileDialog + 'static) -> Self {
        self.dialog = Some(Box::new(dialog));
        self
    }

    /// Set the error reporter
    pub fn errors(mut self, errors: impl ErrorReporter + 'static) -> Self {
        self.errors = Some(Box::new(errors));
        self
    }

    /// Set the preference source
    pub fn preferences(mut self, preferences: impl PreferenceSource + 'static) -> Self {
        self.preferences = Some(Box::new(preferences));
        self
    }

    /// Set the writer
    pub fn writer(mut self, writer: impl TmaDataWriter + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Seed the directory of a previous export
    pub fn last_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.last_directory = Some(dir.into());
        self
    }

    /// Build the command
    pub fn build(self) -> Result<TmaExportCommand> {
        Ok(TmaExportCommand {
            viewers: self
                .viewers
                .ok_or_else(|| missing("viewer provider"))?,
            dialog: self.dialog.ok_or_else(|| missing("save dialog"))?,
            errors: self.errors.ok_or_else(|| missing("error reporter"))?,
            preferences: self
                .preferences
                .ok_or_else(|| missing("preference source"))?,
            writer: self
                .writer
                .unwrap_or_else(|| Box::new(TmaSummaryWriter::default())),
            last_directory: self.last_directory,
        })
    }
}

fn missing(what: &str) -> TmaError {
    TmaError::Validation(format!("{} is required", what))
}
