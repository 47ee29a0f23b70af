//! Object hierarchy and TMA grid model
//!
//! A [`Hierarchy`] holds the objects annotated on one image: an optional
//! [`TmaGrid`] of cores plus a flat list of annotations and detections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a non-core object in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// User-drawn region
    Annotation,
    /// Automatically detected object (e.g. a cell)
    Detection,
}

/// An annotation or detection, optionally assigned to a TMA core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathObject {
    /// Object kind
    pub kind: ObjectKind,

    /// Classification label, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    /// Name of the core this object lies within
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_core: Option<String>,

    /// Numeric measurements
    #[serde(default)]
    pub measurements: BTreeMap<String, f64>,
}

impl PathObject {
    /// Creates a detection inside the named core
    pub fn detection_in(core: impl Into<String>) -> Self {
        Self {
            kind: ObjectKind::Detection,
            classification: None,
            parent_core: Some(core.into()),
            measurements: BTreeMap::new(),
        }
    }

    /// Creates an annotation inside the named core
    pub fn annotation_in(core: impl Into<String>) -> Self {
        Self {
            kind: ObjectKind::Annotation,
            classification: None,
            parent_core: Some(core.into()),
            measurements: BTreeMap::new(),
        }
    }
}

/// One core (sample) of a tissue microarray
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmaCore {
    /// Core label, e.g. `A-1`
    pub name: String,

    /// Whether the core is missing or damaged
    #[serde(default)]
    pub missing: bool,

    /// Identifier linking the core to external clinical data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,

    /// Centroid x in full-resolution pixels
    #[serde(default)]
    pub x: f64,

    /// Centroid y in full-resolution pixels
    #[serde(default)]
    pub y: f64,

    /// Core diameter in full-resolution pixels
    #[serde(default)]
    pub diameter: f64,

    /// Core-level measurements
    #[serde(default)]
    pub measurements: BTreeMap<String, f64>,
}

impl TmaCore {
    /// Creates a present core at the given centroid
    pub fn new(name: impl Into<String>, x: f64, y: f64, diameter: f64) -> Self {
        Self {
            name: name.into(),
            missing: false,
            unique_id: None,
            x,
            y,
            diameter,
            measurements: BTreeMap::new(),
        }
    }

    /// Marks the core as missing
    pub fn with_missing(mut self, missing: bool) -> Self {
        self.missing = missing;
        self
    }

    /// Sets the unique ID
    pub fn with_unique_id(mut self, id: impl Into<String>) -> Self {
        self.unique_id = Some(id.into());
        self
    }

    /// Adds a measurement
    pub fn with_measurement(mut self, name: impl Into<String>, value: f64) -> Self {
        self.measurements.insert(name.into(), value);
        self
    }
}

/// Rectangular grid of TMA cores stored in row-major order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmaGrid {
    width: usize,
    height: usize,
    cores: Vec<TmaCore>,
}

impl TmaGrid {
    /// Creates a grid, checking that `cores` fills it exactly
    pub fn new(width: usize, height: usize, cores: Vec<TmaCore>) -> Result<Self, String> {
        let grid = Self {
            width,
            height,
            cores,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Builds a grid with labels `A-1`, `A-2`, … (letters for rows)
    ///
    /// Cores are laid out on a regular lattice with `spacing` pixels between
    /// centroids.
    pub fn with_default_labels(width: usize, height: usize, spacing: f64, diameter: f64) -> Self {
        let mut cores = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let name = format!("{}-{}", row_label(row), col + 1);
                let x = spacing * (col as f64 + 0.5);
                let y = spacing * (row as f64 + 0.5);
                cores.push(TmaCore::new(name, x, y, diameter));
            }
        }
        Self {
            width,
            height,
            cores,
        }
    }

    /// Checks grid dimensions against the number of cores
    pub fn validate(&self) -> Result<(), String> {
        if self.cores.len() != self.width * self.height {
            return Err(format!(
                "TMA grid is {}x{} but contains {} cores",
                self.width,
                self.height,
                self.cores.len()
            ));
        }
        Ok(())
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cores in the grid
    pub fn n_cores(&self) -> usize {
        self.cores.len()
    }

    /// All cores, row-major
    pub fn cores(&self) -> &[TmaCore] {
        &self.cores
    }

    /// Mutable access to the cores
    pub fn cores_mut(&mut self) -> &mut [TmaCore] {
        &mut self.cores
    }

    /// Core at `(row, col)`, both zero-based
    pub fn core(&self, row: usize, col: usize) -> Option<&TmaCore> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cores.get(row * self.width + col)
    }

    /// Zero-based `(row, col)` for a row-major index
    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        if self.width == 0 || index >= self.cores.len() {
            return None;
        }
        Some((index / self.width, index % self.width))
    }
}

/// Spreadsheet-style row label: 0 → `A`, 25 → `Z`, 26 → `AA`
fn row_label(mut row: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (row % 26) as u8);
        if row < 26 {
            break;
        }
        row = row / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Objects annotated on one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hierarchy {
    /// TMA grid, if the image has been dearrayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tma_grid: Option<TmaGrid>,

    /// Annotations and detections
    #[serde(default)]
    pub objects: Vec<PathObject>,
}

impl Hierarchy {
    /// Creates a hierarchy containing only a TMA grid
    pub fn with_grid(grid: TmaGrid) -> Self {
        Self {
            tma_grid: Some(grid),
            objects: Vec::new(),
        }
    }

    /// True when the hierarchy holds no cores and no other objects
    pub fn is_empty(&self) -> bool {
        let cores = self.tma_grid.as_ref().map_or(0, TmaGrid::n_cores);
        cores == 0 && self.objects.is_empty()
    }

    /// The TMA grid, if present
    pub fn tma_grid(&self) -> Option<&TmaGrid> {
        self.tma_grid.as_ref()
    }

    /// Counts objects of `kind` assigned to the named core
    pub fn count_in_core(&self, core: &str, kind: ObjectKind) -> usize {
        self.objects
            .iter()
            .filter(|o| o.kind == kind && o.parent_core.as_deref() == Some(core))
            .count()
    }

    /// Validates the grid, if any
    pub fn validate(&self) -> Result<(), String> {
        match &self.tma_grid {
            Some(grid) => grid.validate(),
            None => Ok(()),
        }
    }
}
