//! Export summary and outcome reporting
//!
//! This module defines what an export invocation reports back to its caller.

use std::path::PathBuf;
use std::time::Duration;

/// Details of a completed export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// File written, extension included
    pub path: PathBuf,

    /// Absolute directory containing the file
    pub directory: PathBuf,

    /// Downsample factor the data was written with
    pub downsample: f64,

    /// Number of cores written
    pub cores_written: usize,

    /// Core manifest written alongside, if any
    pub manifest: Option<PathBuf>,

    /// Hex-encoded SHA-256 of the written file
    pub checksum: String,

    /// Script expression recorded in the workflow history
    pub replay_expression: String,

    /// Time spent writing
    pub duration: Duration,
}

impl ExportSummary {
    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            path = %self.path.display(),
            cores = self.cores_written,
            downsample = self.downsample,
            checksum = %self.checksum,
            duration_ms = self.duration.as_millis(),
            "TMA export completed"
        );

        if let Some(manifest) = &self.manifest {
            tracing::debug!(manifest = %manifest.display(), "Core manifest written");
        }
    }
}

/// What an export invocation ended with
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// No viewer was active; nothing happened
    NoViewer,

    /// The active image has no TMA data; the user was told
    NoTmaData,

    /// The user dismissed the save dialog
    Cancelled,

    /// Data was written and a workflow step recorded
    Exported(ExportSummary),
}

impl ExportOutcome {
    /// True if data was written
    pub fn is_exported(&self) -> bool {
        matches!(self, Self::Exported(_))
    }

    /// The summary of a completed export
    pub fn summary(&self) -> Option<&ExportSummary> {
        match self {
            Self::Exported(summary) => Some(summary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ExportSummary {
        ExportSummary {
            path: PathBuf::from("/out/block.qptma"),
            directory: PathBuf::from("/out"),
            downsample: 4.0,
            cores_written: 12,
            manifest: None,
            checksum: "abc".to_string(),
            replay_expression: "exportTMAData(\"/out\", 4.0)".to_string(),
            duration: Duration::from_millis(15),
        }
    }

    #[test]
    fn test_outcome_summary_access() {
        let outcome = ExportOutcome::Exported(summary());
        assert!(outcome.is_exported());
        assert_eq!(outcome.summary().unwrap().cores_written, 12);

        for outcome in [
            ExportOutcome::NoViewer,
            ExportOutcome::NoTmaData,
            ExportOutcome::Cancelled,
        ] {
            assert!(!outcome.is_exported());
            assert!(outcome.summary().is_none());
        }
    }
}
