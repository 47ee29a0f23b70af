//! JSON persistence for image data
//!
//! Image data files hold the image reference, its hierarchy and its workflow
//! history, so the history recorded by one session can be replayed later.

use crate::domain::context::ResultExt;
use crate::domain::{ImageData, Result, TmaError};
use std::fs;
use std::path::Path;

/// Loads image data from a JSON file
///
/// # Errors
///
/// Returns an error if the file is missing, is not valid JSON, or contains a
/// TMA grid whose dimensions do not match its cores.
pub fn load_image_data(path: impl AsRef<Path>) -> Result<ImageData> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TmaError::Io(format!(
            "Image data file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read image data file {}", path.display()))?;

    let image_data: ImageData = serde_json::from_str(&contents).map_err(|e| {
        TmaError::Serialization(format!(
            "Failed to parse image data {}: {}",
            path.display(),
            e
        ))
    })?;

    if let Some(hierarchy) = &image_data.hierarchy {
        hierarchy.validate().map_err(TmaError::Validation)?;
    }

    tracing::debug!(
        path = %path.display(),
        image = %image_data.display_name(),
        history_steps = image_data.history.len(),
        "Image data loaded"
    );

    Ok(image_data)
}

/// Saves image data as pretty-printed JSON and records `path` as its last
/// saved location
pub fn save_image_data(path: impl AsRef<Path>, image_data: &mut ImageData) -> Result<()> {
    let path = path.as_ref();
    image_data.last_saved_path = Some(path.to_path_buf());

    let json = serde_json::to_string_pretty(image_data)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write image data file {}", path.display()))?;

    tracing::debug!(path = %path.display(), "Image data saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hierarchy, TmaGrid, WorkflowStep};
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.json");

        let mut image = ImageData::new("/slides/block.svs")
            .with_hierarchy(Hierarchy::with_grid(TmaGrid::with_default_labels(2, 2, 10.0, 8.0)));
        image
            .history
            .add_step(WorkflowStep::scriptable("Export TMA data", "exportTMAData(\"/x\", 4.0)"));

        save_image_data(&path, &mut image).unwrap();
        assert_eq!(image.last_saved_path.as_deref(), Some(path.as_path()));

        let loaded = load_image_data(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image_data("does-not-exist.json");
        assert!(matches!(result, Err(TmaError::Io(_))));
    }

    #[test]
    fn test_load_rejects_inconsistent_grid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let json = r#"{
            "server_path": "/slides/bad.svs",
            "hierarchy": {
                "tma_grid": { "width": 2, "height": 2, "cores": [ { "name": "A-1" } ] }
            }
        }"#;
        std::fs::write(&path, json).unwrap();

        let result = load_image_data(&path);
        assert!(matches!(result, Err(TmaError::Validation(_))));
    }

    #[test]
    fn test_load_minimal_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("min.json");
        std::fs::write(&path, r#"{ "server_path": "/slides/min.svs" }"#).unwrap();

        let loaded = load_image_data(&path).unwrap();
        assert!(loaded.hierarchy.is_none());
        assert!(loaded.history.is_empty());
    }
}
