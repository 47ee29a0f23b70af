//! Image data, viewer and display options
//!
//! [`ImageData`] bundles an image reference with its object hierarchy and
//! workflow history. A [`Viewer`] is what the user is currently looking at:
//! optional image data plus the overlay options used to display it.

use super::hierarchy::Hierarchy;
use super::workflow::WorkflowHistory;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Name shown for images whose path yields no usable name
pub const UNTITLED_IMAGE: &str = "Untitled";

/// An image together with its objects and history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    /// Path or URI of the image server
    pub server_path: String,

    /// Explicit display name, overriding the one derived from `server_path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Object hierarchy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Hierarchy>,

    /// Where the image data was last saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved_path: Option<PathBuf>,

    /// Workflow history
    #[serde(default)]
    pub history: WorkflowHistory,
}

impl ImageData {
    /// Creates image data for the given server path
    pub fn new(server_path: impl Into<String>) -> Self {
        Self {
            server_path: server_path.into(),
            ..Self::default()
        }
    }

    /// Sets the hierarchy
    pub fn with_hierarchy(mut self, hierarchy: Hierarchy) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// Sets the last saved path
    pub fn with_last_saved_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.last_saved_path = Some(path.into());
        self
    }

    /// Sets the explicit display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name suitable for display and default file names
    ///
    /// Uses the explicit name if set, otherwise the file stem of the server
    /// path (URI query strings and fragments are ignored).
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return name.to_string();
            }
        }

        let path = self
            .server_path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = path.trim_end_matches(['/', '\\']);
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or_default();

        Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNTITLED_IMAGE.to_string())
    }
}

/// Overlay display options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
    /// Draw the TMA grid
    #[serde(default = "default_true")]
    pub show_tma_grid: bool,

    /// Draw core labels
    #[serde(default = "default_true")]
    pub show_tma_core_labels: bool,

    /// Draw annotations
    #[serde(default = "default_true")]
    pub show_annotations: bool,

    /// Draw detections
    #[serde(default = "default_true")]
    pub show_detections: bool,

    /// Fill detections rather than outlining them
    #[serde(default)]
    pub fill_detections: bool,

    /// Overlay opacity in `[0, 1]`
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            show_tma_grid: true,
            show_tma_core_labels: true,
            show_annotations: true,
            show_detections: true,
            fill_detections: false,
            opacity: default_opacity(),
        }
    }
}

impl OverlayOptions {
    /// Names of the overlay layers that would be drawn
    pub fn visible_layers(&self) -> Vec<&'static str> {
        let mut layers = Vec::new();
        if self.opacity <= 0.0 {
            return layers;
        }
        if self.show_tma_grid {
            layers.push("tma_grid");
        }
        if self.show_tma_core_labels {
            layers.push("tma_core_labels");
        }
        if self.show_annotations {
            layers.push("annotations");
        }
        if self.show_detections {
            layers.push(if self.fill_detections {
                "detections_filled"
            } else {
                "detections"
            });
        }
        layers
    }

    /// Checks the opacity range
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(format!(
                "overlay.opacity must be between 0 and 1, got {}",
                self.opacity
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

/// The active data source: image data shown with some overlay options
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    /// Image currently open, if any
    pub image_data: Option<ImageData>,

    /// Display options of this viewer
    pub overlay_options: OverlayOptions,
}

impl Viewer {
    /// Creates a viewer showing `image_data`
    pub fn new(image_data: ImageData, overlay_options: OverlayOptions) -> Self {
        Self {
            image_data: Some(image_data),
            overlay_options,
        }
    }

    /// Creates a viewer with no image open
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Viewer handle shared between the UI and commands
pub type SharedViewer = Arc<Mutex<Viewer>>;

/// Wraps a viewer for sharing
pub fn share(viewer: Viewer) -> SharedViewer {
    Arc::new(Mutex::new(viewer))
}
