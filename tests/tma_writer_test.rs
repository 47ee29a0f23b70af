//! Integration tests for the default TMA summary writer

use std::fs;
use tempfile::tempdir;
use tma_export::adapters::tma_io::{TmaDataWriter, TmaSummaryWriter};
use tma_export::domain::{
    Hierarchy, ImageData, OverlayOptions, PathObject, TmaCore, TmaError, TmaGrid,
};

fn measured_image() -> ImageData {
    let cores = vec![
        TmaCore::new("A-1", 100.0, 200.0, 80.0)
            .with_unique_id("P-001")
            .with_measurement("Tumor %", 40.0),
        TmaCore::new("A-2", 300.0, 200.0, 80.0).with_missing(true),
    ];
    let mut hierarchy = Hierarchy::with_grid(TmaGrid::new(2, 1, cores).unwrap());
    hierarchy.objects.push(PathObject::detection_in("A-1"));
    hierarchy.objects.push(PathObject::detection_in("A-1"));
    hierarchy.objects.push(PathObject::annotation_in("A-1"));
    ImageData::new("/slides/block.svs").with_hierarchy(hierarchy)
}

#[test]
fn test_summary_column_layout() {
    let summary = TmaSummaryWriter::render_summary(&measured_image()).unwrap();
    let lines: Vec<&str> = summary.lines().collect();

    assert_eq!(
        lines[0],
        "Image\tCore\tRow\tColumn\tMissing\tUnique ID\tNum Detections\tNum Annotations\tTumor %"
    );
    assert_eq!(lines[1], "block\tA-1\t1\t1\tfalse\tP-001\t2\t1\t40.0");
    assert_eq!(lines[2], "block\tA-2\t1\t2\ttrue\t\t0\t0\tNaN");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_write_creates_summary_and_manifest() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("block.qptma");

    let report = TmaSummaryWriter::default()
        .write_tma_data(&path, &measured_image(), &OverlayOptions::default(), 4.0)
        .unwrap();

    assert_eq!(report.path, path);
    assert_eq!(report.cores_written, 2);
    assert_eq!(report.checksum.len(), 64);

    let manifest_path = report.manifest.unwrap();
    assert_eq!(manifest_path, dir.path().join("block-cores.json"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["image"], "block");
    assert_eq!(manifest["downsample"], 4.0);
    assert_eq!(manifest["cores"][0]["x"], 25.0);
    assert_eq!(manifest["cores"][0]["diameter"], 20.0);
    assert_eq!(manifest["cores"][1]["missing"], true);
    assert_eq!(manifest["overlay_layers"][0], "tma_grid");
}

#[test]
fn test_manifest_skipped_for_invalid_downsample_or_when_disabled() {
    let dir = tempdir().unwrap();

    let path = dir.path().join("nan.qptma");
    let report = TmaSummaryWriter::default()
        .write_tma_data(&path, &measured_image(), &OverlayOptions::default(), f64::NAN)
        .unwrap();
    assert!(report.manifest.is_none());
    assert!(path.is_file());

    let path = dir.path().join("off.qptma");
    let report = TmaSummaryWriter::new(false)
        .write_tma_data(&path, &measured_image(), &OverlayOptions::default(), 2.0)
        .unwrap();
    assert!(report.manifest.is_none());
    assert!(!dir.path().join("off-cores.json").exists());
}

#[test]
fn test_write_without_grid_fails_without_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.qptma");

    let err = TmaSummaryWriter::default()
        .write_tma_data(
            &path,
            &ImageData::new("/slides/plain.svs"),
            &OverlayOptions::default(),
            4.0,
        )
        .unwrap_err();
    assert!(matches!(err, TmaError::Write(_)));
    assert!(!path.exists());
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("block.qptma");

    let result = TmaSummaryWriter::default().write_tma_data(
        &path,
        &measured_image(),
        &OverlayOptions::default(),
        4.0,
    );
    assert!(result.is_err());
    assert!(!path.exists());
}

#[test]
fn test_checksum_matches_file_contents() {
    use sha2::{Digest, Sha256};

    let dir = tempdir().unwrap();
    let path = dir.path().join("block.qptma");
    let report = TmaSummaryWriter::new(false)
        .write_tma_data(&path, &measured_image(), &OverlayOptions::default(), 1.0)
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(report.checksum, format!("{:x}", Sha256::digest(&bytes)));
}
