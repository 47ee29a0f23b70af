//! Workflow replay
//!
//! Re-runs recorded workflow scripts against image data. Only the export
//! step is understood; other functions are skipped so that histories from
//! richer environments can still be replayed for their exports.

use super::export::{EXPORT_FUNCTION, TMA_DATA_EXTENSION};
use super::script::{parse_script, ScriptCall};
use crate::adapters::tma_io::{TmaDataWriter, TmaSummaryWriter};
use crate::domain::context::ResultExt;
use crate::domain::{
    ImageData, OverlayOptions, Result, ScriptError, TmaError, WorkflowHistory,
};
use std::path::PathBuf;

/// A call that could not be replayed
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFailure {
    /// Zero-based position of the call in the script
    pub index: usize,

    /// The call as written
    pub call: String,

    /// Why it failed
    pub error: String,
}

/// Result of replaying a script
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    /// Calls run successfully
    pub executed: usize,

    /// Calls with unknown functions
    pub skipped: usize,

    /// Calls that failed
    pub failures: Vec<ReplayFailure>,

    /// Files written, in order
    pub written: Vec<PathBuf>,
}

impl ReplaySummary {
    /// True if no call failed
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replays workflow scripts
pub struct WorkflowReplayer {
    writer: Box<dyn TmaDataWriter>,
    overlay_options: OverlayOptions,
}

impl Default for WorkflowReplayer {
    fn default() -> Self {
        Self::new(TmaSummaryWriter::default())
    }
}

impl WorkflowReplayer {
    /// Creates a replayer writing through `writer` with default overlay options
    pub fn new(writer: impl TmaDataWriter + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            overlay_options: OverlayOptions::default(),
        }
    }

    /// Uses `overlay_options` for replayed exports
    pub fn with_overlay_options(mut self, overlay_options: OverlayOptions) -> Self {
        self.overlay_options = overlay_options;
        self
    }

    /// Replays every step of `history`
    pub fn replay_history(
        &self,
        history: &WorkflowHistory,
        image_data: &ImageData,
    ) -> Result<ReplaySummary> {
        self.replay(&history.to_script(), image_data)
    }

    /// Parses and runs `script` against `image_data`
    ///
    /// # Errors
    ///
    /// Returns [`TmaError::Script`] if the script does not parse. Failures of
    /// individual calls are collected in the summary instead.
    pub fn replay(&self, script: &str, image_data: &ImageData) -> Result<ReplaySummary> {
        let calls = parse_script(script)?;
        let mut summary = ReplaySummary::default();

        for (index, call) in calls.iter().enumerate() {
            if call.function != EXPORT_FUNCTION {
                tracing::warn!(function = %call.function, index, "Skipping unsupported workflow step");
                summary.skipped += 1;
                continue;
            }

            match self.replay_export(call, image_data) {
                Ok(path) => {
                    summary.executed += 1;
                    summary.written.push(path);
                }
                Err(e) => {
                    tracing::error!(error = %e, call = %call, index, "Workflow step failed");
                    summary.failures.push(ReplayFailure {
                        index,
                        call: call.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            executed = summary.executed,
            skipped = summary.skipped,
            failed = summary.failures.len(),
            "Workflow replay finished"
        );
        Ok(summary)
    }

    fn replay_export(&self, call: &ScriptCall, image_data: &ImageData) -> Result<PathBuf> {
        let (directory, downsample) = match call.arguments.as_slice() {
            [dir, downsample] => match (dir.as_str(), downsample.as_f64()) {
                (Some(dir), Some(downsample)) => (PathBuf::from(dir), downsample),
                _ => {
                    return Err(invalid_arguments(
                        call,
                        format!(
                            "expected (string, number), got ({}, {})",
                            dir.type_name(),
                            downsample.type_name()
                        ),
                    ))
                }
            },
            args => {
                return Err(invalid_arguments(
                    call,
                    format!("expected 2 arguments, got {}", args.len()),
                ))
            }
        };

        let stem = file_stem_for(image_data)?;
        std::fs::create_dir_all(&directory)
            .with_context(|| format!("Cannot create directory {}", directory.display()))?;

        let path = directory.join(format!("{stem}{TMA_DATA_EXTENSION}"));
        let report =
            self.writer
                .write_tma_data(&path, image_data, &self.overlay_options, downsample)?;
        Ok(report.path)
    }
}

/// Image name as a single path component
fn file_stem_for(image_data: &ImageData) -> Result<String> {
    let name = image_data.display_name();
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(TmaError::Validation(format!(
            "Image name '{name}' cannot be used as a file name"
        )));
    }
    Ok(name)
}

fn invalid_arguments(call: &ScriptCall, reason: String) -> TmaError {
    ScriptError::InvalidArguments {
        function: call.function.clone(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hierarchy, TmaGrid};
    use tempfile::tempdir;

    fn image() -> ImageData {
        ImageData::new("/slides/block.svs")
            .with_hierarchy(Hierarchy::with_grid(TmaGrid::with_default_labels(2, 1, 50.0, 40.0)))
    }

    #[test]
    fn test_replay_export_writes_named_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested");
        let script = format!(
            "{}\n",
            crate::core::export::export_call(&out, 2.0).unwrap()
        );

        let summary = WorkflowReplayer::default().replay(&script, &image()).unwrap();
        assert_eq!(summary.executed, 1);
        assert!(summary.is_successful());
        assert_eq!(summary.written, vec![out.join("block.qptma")]);
        assert!(out.join("block.qptma").is_file());
    }

    #[test]
    fn test_unknown_functions_are_skipped() {
        let summary = WorkflowReplayer::default()
            .replay("setImageType(\"BRIGHTFIELD_H_E\")\n// note\n", &image())
            .unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.executed, 0);
        assert!(summary.written.is_empty());
    }

    #[test]
    fn test_bad_arguments_are_failures() {
        let summary = WorkflowReplayer::default()
            .replay("exportTMAData(4.0); exportTMAData(\"/tmp\", \"4\")", &image())
            .unwrap();
        assert_eq!(summary.failures.len(), 2);
        assert_eq!(summary.failures[0].index, 0);
        assert!(summary.failures[0].error.contains("expected 2 arguments"));
        assert!(summary.failures[1].error.contains("(string, string)"));
    }

    #[test]
    fn test_parse_error_is_returned() {
        let err = WorkflowReplayer::default()
            .replay("exportTMAData(\"/tmp\"", &image())
            .unwrap_err();
        assert!(matches!(err, TmaError::Script(_)));
    }

    #[test]
    fn test_replay_rejects_image_name_with_separators() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let script = format!(
            "{}\n",
            crate::core::export::export_call(&out, 2.0).unwrap()
        );

        for name in ["../escape", r"..\escape", ".."] {
            let image = image().with_name(name);
            let summary = WorkflowReplayer::default().replay(&script, &image).unwrap();
            assert_eq!(summary.failures.len(), 1, "{name}");
            assert!(summary.written.is_empty());
        }
        assert!(!dir.path().join("escape.qptma").exists());
        assert!(!out.exists());
    }
}
