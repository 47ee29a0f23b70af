//! Collaborator traits for user-facing commands
//!
//! Commands receive every UI concern through these traits so that the same
//! command runs under a GUI, a terminal or a test harness.

use crate::domain::SharedViewer;
use std::path::PathBuf;
use std::sync::Mutex;

/// Supplies the viewer the user is currently working in
///
/// Queried on every command invocation; implementations must not assume the
/// result is cached.
pub trait ViewerProvider {
    /// The active viewer, or `None` if no viewer is open
    fn current_viewer(&self) -> Option<SharedViewer>;
}

impl<F> ViewerProvider for F
where
    F: Fn() -> Option<SharedViewer>,
{
    fn current_viewer(&self) -> Option<SharedViewer> {
        self()
    }
}

/// Settable holder for the active viewer
#[derive(Debug, Default)]
pub struct ViewerSlot {
    current: Mutex<Option<SharedViewer>>,
}

impl ViewerSlot {
    /// Creates a slot with no active viewer
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot holding `viewer`
    pub fn with_viewer(viewer: SharedViewer) -> Self {
        Self {
            current: Mutex::new(Some(viewer)),
        }
    }

    /// Replaces the active viewer
    pub fn set(&self, viewer: Option<SharedViewer>) {
        match self.current.lock() {
            Ok(mut current) => *current = viewer,
            Err(poisoned) => *poisoned.into_inner() = viewer,
        }
    }
}

impl ViewerProvider for ViewerSlot {
    fn current_viewer(&self) -> Option<SharedViewer> {
        match self.current.lock() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Everything a save dialog needs to pre-populate itself
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFileRequest {
    /// Dialog title; `None` lets the dialog pick its own
    pub title: Option<String>,
    /// Directory to open in; `None` lets the dialog choose (e.g. home)
    pub default_directory: Option<PathBuf>,
    /// Suggested file name, without extension
    pub default_name: String,
    /// Human-readable format label, e.g. `TMA data`
    pub format_label: String,
    /// Extension including the leading dot, e.g. `.qptma`
    pub extension: String,
}

/// Blocking "save file" prompt
pub trait SaveFileDialog {
    /// Asks the user for a destination; `None` means the user cancelled
    fn prompt_to_save_file(&self, request: &SaveFileRequest) -> Option<PathBuf>;
}

/// Shows errors to the user
pub trait ErrorReporter {
    /// Displays an error and blocks until acknowledged
    fn show_error(&self, title: &str, message: &str);
}

/// Persistent user preferences read by commands
pub trait PreferenceSource {
    /// Downsample factor applied to exported TMA core data
    fn tma_export_downsample(&self) -> f64;
}
