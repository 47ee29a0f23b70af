//! Tab-delimited TMA summary writer
//!
//! Writes one row per core with the core's position, status, object counts
//! and measurements. When a positive finite downsample is given, a JSON core
//! manifest with coordinates scaled by that downsample is written alongside.

use super::traits::{TmaDataWriter, WriteReport};
use crate::domain::{Hierarchy, ImageData, ObjectKind, OverlayOptions, Result, TmaError, TmaGrid};
use crate::core::script::format_number;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fixed leading columns of the summary
pub const SUMMARY_COLUMNS: [&str; 8] = [
    "Image",
    "Core",
    "Row",
    "Column",
    "Missing",
    "Unique ID",
    "Num Detections",
    "Num Annotations",
];

/// Suffix appended to the summary stem for the core manifest
pub const MANIFEST_SUFFIX: &str = "-cores.json";

const DELIMITER: u8 = b'\t';

/// Default [`TmaDataWriter`]
#[derive(Debug, Clone)]
pub struct TmaSummaryWriter {
    write_manifest: bool,
}

impl Default for TmaSummaryWriter {
    fn default() -> Self {
        Self {
            write_manifest: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct CoreManifest<'a> {
    image: String,
    downsample: f64,
    overlay_layers: Vec<&'static str>,
    cores: Vec<ManifestCore<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestCore<'a> {
    name: &'a str,
    row: usize,
    column: usize,
    missing: bool,
    x: f64,
    y: f64,
    diameter: f64,
}

impl TmaSummaryWriter {
    /// Creates a writer; `write_manifest` toggles the JSON core manifest
    pub fn new(write_manifest: bool) -> Self {
        Self { write_manifest }
    }

    /// Renders the summary table for `image_data`
    pub fn render_summary(image_data: &ImageData) -> Result<String> {
        let (hierarchy, grid) = grid_of(image_data)?;
        let image_name = image_data.display_name();

        let measurement_names: BTreeSet<&str> = grid
            .cores()
            .iter()
            .flat_map(|core| core.measurements.keys().map(String::as_str))
            .collect();

        let mut out = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_writer(Vec::new());
        let header = SUMMARY_COLUMNS
            .iter()
            .copied()
            .chain(measurement_names.iter().copied());
        out.write_record(header).map_err(csv_error)?;

        for (index, core) in grid.cores().iter().enumerate() {
            let (row, col) = grid.position_of(index).unwrap_or((0, 0));
            let mut fields = vec![
                image_name.clone(),
                core.name.clone(),
                (row + 1).to_string(),
                (col + 1).to_string(),
                core.missing.to_string(),
                core.unique_id.clone().unwrap_or_default(),
                hierarchy
                    .count_in_core(&core.name, ObjectKind::Detection)
                    .to_string(),
                hierarchy
                    .count_in_core(&core.name, ObjectKind::Annotation)
                    .to_string(),
            ];
            for name in &measurement_names {
                let value = core.measurements.get(*name).copied().unwrap_or(f64::NAN);
                fields.push(format_number(value));
            }
            out.write_record(&fields).map_err(csv_error)?;
        }

        let bytes = out
            .into_inner()
            .map_err(|e| TmaError::Write(format!("cannot render TMA summary: {}", e.error())))?;
        String::from_utf8(bytes)
            .map_err(|e| TmaError::Write(format!("TMA summary is not valid UTF-8: {e}")))
    }

    /// Path of the manifest written next to `summary_path`
    pub fn manifest_path(summary_path: &Path) -> PathBuf {
        let stem = summary_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        summary_path.with_file_name(format!("{stem}{MANIFEST_SUFFIX}"))
    }

    fn render_manifest(
        image_data: &ImageData,
        grid: &TmaGrid,
        overlay_options: &OverlayOptions,
        downsample: f64,
    ) -> Result<String> {
        let cores = grid
            .cores()
            .iter()
            .enumerate()
            .map(|(index, core)| {
                let (row, column) = grid.position_of(index).unwrap_or((0, 0));
                ManifestCore {
                    name: &core.name,
                    row: row + 1,
                    column: column + 1,
                    missing: core.missing,
                    x: core.x / downsample,
                    y: core.y / downsample,
                    diameter: core.diameter / downsample,
                }
            })
            .collect();

        let manifest = CoreManifest {
            image: image_data.display_name(),
            downsample,
            overlay_layers: overlay_options.visible_layers(),
            cores,
        };
        Ok(serde_json::to_string_pretty(&manifest)?)
    }
}

impl TmaDataWriter for TmaSummaryWriter {
    fn write_tma_data(
        &self,
        path: &Path,
        image_data: &ImageData,
        overlay_options: &OverlayOptions,
        downsample: f64,
    ) -> Result<WriteReport> {
        let (_, grid) = grid_of(image_data)?;
        let summary = Self::render_summary(image_data)?;

        let wants_manifest = self.write_manifest && downsample.is_finite() && downsample > 0.0;
        let manifest_contents = if wants_manifest {
            Some(Self::render_manifest(image_data, grid, overlay_options, downsample)?)
        } else {
            None
        };

        // manifest goes first; the summary at `path` is only replaced once it is in place
        let staged_summary = stage(path, summary.as_bytes())?;
        let manifest = match manifest_contents {
            Some(contents) => {
                let manifest_path = Self::manifest_path(path);
                let staged_manifest = stage(&manifest_path, contents.as_bytes())?;
                publish(staged_manifest, &manifest_path)?;
                Some(manifest_path)
            }
            None => None,
        };
        publish(staged_summary, path)?;

        let checksum = format!("{:x}", Sha256::digest(summary.as_bytes()));
        tracing::debug!(
            path = %path.display(),
            cores = grid.n_cores(),
            manifest = ?manifest,
            "TMA summary written"
        );

        Ok(WriteReport {
            path: path.to_path_buf(),
            cores_written: grid.n_cores(),
            manifest,
            checksum,
        })
    }
}

fn grid_of(image_data: &ImageData) -> Result<(&Hierarchy, &TmaGrid)> {
    let hierarchy = image_data
        .hierarchy
        .as_ref()
        .ok_or_else(|| TmaError::Write("image has no object hierarchy".to_string()))?;
    let grid = hierarchy
        .tma_grid()
        .ok_or_else(|| TmaError::Write("image has no TMA grid".to_string()))?;
    Ok((hierarchy, grid))
}

fn csv_error(e: csv::Error) -> TmaError {
    TmaError::Write(format!("cannot render TMA summary: {e}"))
}

/// Writes `contents` to a temp file in the directory of `path`
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| {
        TmaError::Write(format!("cannot create file in {}: {e}", dir.display()))
    })?;
    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|e| TmaError::Write(format!("cannot write {}: {e}", path.display())))?;
    Ok(file)
}

/// Renames a staged file over `path`
fn publish(file: NamedTempFile, path: &Path) -> Result<()> {
    file.persist(path)
        .map_err(|e| TmaError::Write(format!("cannot save {}: {}", path.display(), e.error)))?;
    Ok(())
}
