//! External integrations
//!
//! - [`ui`] - viewer, dialog, error and preference collaborators
//! - [`tma_io`] - TMA data writers
//! - [`project`] - image data files

pub mod project;
pub mod tma_io;
pub mod ui;
