//! User-interface collaborators
//!
//! - [`traits`] - what commands need from a UI (viewer, dialog, errors, preferences)
//! - [`console`] - terminal implementations used by the CLI

pub mod console;
pub mod traits;

pub use console::{ConsoleErrorReporter, FixedPathDialog, StdinSaveDialog};
pub use traits::{
    ErrorReporter, PreferenceSource, SaveFileDialog, SaveFileRequest, ViewerProvider, ViewerSlot,
};
