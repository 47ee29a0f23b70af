//! TMA export command and its supporting types
//!
//! This module provides:
//! - [`TmaExportCommand`], the user-facing export action
//! - Destination resolution (default directory, file extension)
//! - Export outcome and summary reporting

pub mod action;
pub mod destination;
pub mod summary;

pub use action::{
    export_call, TmaExportCommand, TmaExportCommandBuilder, EXPORT_ERROR_TITLE, EXPORT_FUNCTION,
    EXPORT_STEP_NAME, NO_TMA_DATA_MESSAGE,
};
pub use destination::{TMA_DATA_EXTENSION, TMA_DATA_FORMAT_LABEL};
pub use summary::{ExportOutcome, ExportSummary};
