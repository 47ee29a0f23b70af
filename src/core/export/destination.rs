//! Destination resolution for exports
//!
//! Picks the directory a save dialog opens in and normalizes the file name the
//! user chose.

use crate::domain::{Result, TmaError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension of exported TMA data files
pub const TMA_DATA_EXTENSION: &str = ".qptma";

/// Format label shown in save dialogs
pub const TMA_DATA_FORMAT_LABEL: &str = "TMA data";

/// Directory to suggest in the save dialog
///
/// Prefers the directory of the previous export in this session, then the
/// directory the image was last saved to. The candidate is dropped when it
/// is not an existing directory, leaving the choice to the dialog.
pub fn default_directory(
    last_directory: Option<&Path>,
    last_saved_path: Option<&Path>,
) -> Option<PathBuf> {
    let candidate = match last_directory {
        Some(dir) => dir.to_path_buf(),
        None => last_saved_path?.parent()?.to_path_buf(),
    };

    if candidate.is_dir() {
        Some(candidate)
    } else {
        tracing::debug!(
            directory = %candidate.display(),
            "Default export directory no longer exists"
        );
        None
    }
}

/// Appends `extension` unless the file name already ends with it
///
/// `export` becomes `export.qptma`, `export.txt` becomes `export.txt.qptma`
/// and `export.qptma` is returned unchanged.
pub fn ensure_extension(path: PathBuf, extension: &str) -> PathBuf {
    let Some(name) = path.file_name() else {
        let mut raw: OsString = path.into_os_string();
        raw.push(extension);
        return PathBuf::from(raw);
    };
    if name.to_string_lossy().ends_with(extension) {
        return path;
    }

    // rebuilt from parent and name so a trailing separator is dropped
    let mut name = name.to_os_string();
    name.push(extension);
    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Directory containing `file`; `.` for bare file names
pub fn parent_directory(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Absolute form of `dir`, without resolving symlinks
pub fn absolute_directory(dir: &Path) -> Result<PathBuf> {
    std::path::absolute(dir).map_err(|e| {
        TmaError::Io(format!(
            "Cannot resolve absolute path of {}: {}",
            dir.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_extension() {
        assert_eq!(
            ensure_extension(PathBuf::from("/out/export"), TMA_DATA_EXTENSION),
            PathBuf::from("/out/export.qptma")
        );
        assert_eq!(
            ensure_extension(PathBuf::from("/out/export.qptma"), TMA_DATA_EXTENSION),
            PathBuf::from("/out/export.qptma")
        );
        assert_eq!(
            ensure_extension(PathBuf::from("export.txt"), TMA_DATA_EXTENSION),
            PathBuf::from("export.txt.qptma")
        );
    }

    #[test]
    fn test_ensure_extension_is_case_sensitive() {
        assert_eq!(
            ensure_extension(PathBuf::from("export.QPTMA"), TMA_DATA_EXTENSION),
            PathBuf::from("export.QPTMA.qptma")
        );
    }

    #[test]
    fn test_ensure_extension_drops_trailing_separator() {
        assert_eq!(
            ensure_extension(PathBuf::from("/out/"), TMA_DATA_EXTENSION),
            PathBuf::from("/out.qptma")
        );
        assert_eq!(
            ensure_extension(PathBuf::from("/data/out/"), TMA_DATA_EXTENSION),
            PathBuf::from("/data/out.qptma")
        );
    }

    #[test]
    fn test_default_directory_prefers_last_directory() {
        let previous = tempdir().unwrap();
        let saved = tempdir().unwrap();
        let saved_file = saved.path().join("slide.qpdata");

        let dir = default_directory(Some(previous.path()), Some(&saved_file));
        assert_eq!(dir.as_deref(), Some(previous.path()));
    }

    #[test]
    fn test_default_directory_from_last_saved_path() {
        let saved = tempdir().unwrap();
        let saved_file = saved.path().join("slide.qpdata");

        let dir = default_directory(None, Some(&saved_file));
        assert_eq!(dir.as_deref(), Some(saved.path()));
    }

    #[test]
    fn test_default_directory_missing_is_none() {
        let gone = tempdir().unwrap().path().to_path_buf();
        assert_eq!(default_directory(Some(&gone), None), None);
        assert_eq!(
            default_directory(None, Some(&gone.join("slide.qpdata"))),
            None
        );
        assert_eq!(default_directory(None, None), None);
    }

    #[test]
    fn test_stale_last_directory_does_not_fall_back() {
        let gone = tempdir().unwrap().path().to_path_buf();
        let saved = tempdir().unwrap();
        let dir = default_directory(Some(&gone), Some(&saved.path().join("slide.qpdata")));
        assert_eq!(dir, None);
    }

    #[test]
    fn test_parent_directory() {
        assert_eq!(parent_directory(Path::new("/out/a.qptma")), PathBuf::from("/out"));
        assert_eq!(parent_directory(Path::new("a.qptma")), PathBuf::from("."));
    }

    #[test]
    fn test_absolute_directory() {
        let abs = absolute_directory(Path::new("relative/dir")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("relative/dir"));
    }
}
