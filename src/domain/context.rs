//! Error context extension trait
//!
//! Adds `.context()` and `.with_context()` to results whose error converts
//! into [`TmaError`]. Unlike `anyhow::Context`, the error keeps its
//! [`TmaError`] variant; only the message gains the context prefix.
//!
//! # Examples
//!
//! ```rust
//! use tma_export::domain::{Result, TmaError};
//! use tma_export::domain::context::ResultExt;
//!
//! fn read_script(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read script {}", path))
//! }
//!
//! let err = read_script("/nonexistent/steps.txt").unwrap_err();
//! assert!(matches!(err, TmaError::Io(msg) if msg.starts_with("Failed to read script")));
//! ```

use crate::domain::errors::TmaError;
use crate::domain::result::Result;
use std::fmt::Display;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display;

    /// Add context computed only if an error occurs
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<TmaError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display,
    {
        self.map_err(|e| prefix(e.into(), &context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| prefix(e.into(), &f()))
    }
}

fn prefix(error: TmaError, context: &dyn Display) -> TmaError {
    match error {
        TmaError::Configuration(msg) => TmaError::Configuration(format!("{context}: {msg}")),
        TmaError::Validation(msg) => TmaError::Validation(format!("{context}: {msg}")),
        TmaError::Write(msg) => TmaError::Write(format!("{context}: {msg}")),
        TmaError::State(msg) => TmaError::State(format!("{context}: {msg}")),
        TmaError::Serialization(msg) => TmaError::Serialization(format!("{context}: {msg}")),
        TmaError::Io(msg) => TmaError::Io(format!("{context}: {msg}")),
        TmaError::Other(msg) => TmaError::Other(format!("{context}: {msg}")),
        // script errors carry structured offsets
        script @ TmaError::Script(_) => TmaError::Other(format!("{context}: {script}")),
    }
}
