//! TMA data writer abstraction

use crate::domain::{ImageData, OverlayOptions, Result};
use std::path::{Path, PathBuf};

/// Outcome of a successful TMA data write
#[derive(Debug, Clone, PartialEq)]
pub struct WriteReport {
    /// Summary file written
    pub path: PathBuf,

    /// Number of cores in the summary
    pub cores_written: usize,

    /// Core manifest written next to the summary, if any
    pub manifest: Option<PathBuf>,

    /// Hex-encoded SHA-256 of the summary file
    pub checksum: String,
}

/// Serializes TMA data for one image
///
/// The file layout belongs entirely to the implementation; callers only pass
/// the destination and what to write.
pub trait TmaDataWriter {
    /// Writes TMA data for `image_data` to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no TMA grid or the file cannot be
    /// written. Implementations must not leave a partial file behind.
    fn write_tma_data(
        &self,
        path: &Path,
        image_data: &ImageData,
        overlay_options: &OverlayOptions,
        downsample: f64,
    ) -> Result<WriteReport>;
}
