//! Domain models and types for tma-export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Image model** ([`ImageData`], [`Viewer`], [`OverlayOptions`])
//! - **Hierarchy model** ([`Hierarchy`], [`TmaGrid`], [`TmaCore`], [`PathObject`])
//! - **Workflow model** ([`WorkflowStep`], [`WorkflowHistory`])
//! - **Error types** ([`TmaError`], [`ScriptError`]) and the [`context::ResultExt`] helper
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use tma_export::domain::{Hierarchy, ImageData, TmaGrid};
//!
//! let grid = TmaGrid::with_default_labels(4, 3, 1200.0, 1000.0);
//! let image = ImageData::new("/slides/block_1.svs").with_hierarchy(Hierarchy::with_grid(grid));
//!
//! assert_eq!(image.display_name(), "block_1");
//! assert_eq!(image.hierarchy.as_ref().and_then(|h| h.tma_grid()).map(|g| g.n_cores()), Some(12));
//! ```

pub mod context;
pub mod errors;
pub mod hierarchy;
pub mod image;
pub mod result;
pub mod workflow;

// Re-export commonly used types for convenience
pub use errors::{ScriptError, TmaError};
pub use hierarchy::{Hierarchy, ObjectKind, PathObject, TmaCore, TmaGrid};
pub use image::{share, ImageData, OverlayOptions, SharedViewer, Viewer};
pub use result::Result;
pub use workflow::{WorkflowHistory, WorkflowStep};
