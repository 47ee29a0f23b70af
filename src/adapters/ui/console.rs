//! Terminal implementations of the UI collaborators

use super::traits::{ErrorReporter, SaveFileDialog, SaveFileRequest};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Dialog that answers every prompt with a pre-chosen path
///
/// Used when the destination comes from the command line. `None` behaves
/// like a user who always cancels.
#[derive(Debug, Clone, Default)]
pub struct FixedPathDialog {
    answer: Option<PathBuf>,
}

impl FixedPathDialog {
    /// Creates a dialog that always returns `answer`
    pub fn new(answer: Option<PathBuf>) -> Self {
        Self { answer }
    }
}

impl SaveFileDialog for FixedPathDialog {
    fn prompt_to_save_file(&self, request: &SaveFileRequest) -> Option<PathBuf> {
        tracing::debug!(
            default_name = %request.default_name,
            answer = ?self.answer,
            "Save dialog answered from command line"
        );
        self.answer.clone()
    }
}

/// Dialog that prompts for a path on stdin
///
/// An empty answer cancels. Relative answers are resolved against the
/// suggested directory when there is one.
#[derive(Debug, Clone, Default)]
pub struct StdinSaveDialog;

impl StdinSaveDialog {
    fn read_answer(request: &SaveFileRequest) -> io::Result<Option<PathBuf>> {
        let suggestion = match &request.default_directory {
            Some(dir) => dir.join(format!("{}{}", request.default_name, request.extension)),
            None => PathBuf::from(format!("{}{}", request.default_name, request.extension)),
        };

        let mut stdout = io::stdout();
        if let Some(title) = &request.title {
            writeln!(stdout, "{title}")?;
        }
        write!(
            stdout,
            "Save {} as [{}] (empty to cancel, '.' to accept): ",
            request.format_label,
            suggestion.display()
        )?;
        stdout.flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(resolve_answer(input.trim(), &suggestion, request))
    }
}

fn resolve_answer(answer: &str, suggestion: &Path, request: &SaveFileRequest) -> Option<PathBuf> {
    match answer {
        "" => None,
        "." => Some(suggestion.to_path_buf()),
        path => {
            let path = PathBuf::from(path);
            match &request.default_directory {
                Some(dir) if path.is_relative() => Some(dir.join(path)),
                _ => Some(path),
            }
        }
    }
}

impl SaveFileDialog for StdinSaveDialog {
    fn prompt_to_save_file(&self, request: &SaveFileRequest) -> Option<PathBuf> {
        match Self::read_answer(request) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read destination from stdin");
                None
            }
        }
    }
}

/// Prints errors to stderr and the log
#[derive(Debug, Clone, Default)]
pub struct ConsoleErrorReporter;

impl ErrorReporter for ConsoleErrorReporter {
    fn show_error(&self, title: &str, message: &str) {
        tracing::error!(title = %title, message = %message, "Error shown to user");
        eprintln!("❌ {title}: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(dir: Option<&str>) -> SaveFileRequest {
        SaveFileRequest {
            title: None,
            default_directory: dir.map(PathBuf::from),
            default_name: "block".to_string(),
            format_label: "TMA data".to_string(),
            extension: ".qptma".to_string(),
        }
    }

    #[test]
    fn test_fixed_path_dialog() {
        let dialog = FixedPathDialog::new(Some(PathBuf::from("/tmp/out.qptma")));
        assert_eq!(
            dialog.prompt_to_save_file(&request(None)),
            Some(PathBuf::from("/tmp/out.qptma"))
        );
        assert_eq!(FixedPathDialog::default().prompt_to_save_file(&request(None)), None);
    }

    #[test]
    fn test_resolve_answer() {
        let req = request(Some("/data/proj"));
        let suggestion = PathBuf::from("/data/proj/block.qptma");

        assert_eq!(resolve_answer("", &suggestion, &req), None);
        assert_eq!(resolve_answer(".", &suggestion, &req), Some(suggestion.clone()));
        assert_eq!(
            resolve_answer("other", &suggestion, &req),
            Some(PathBuf::from("/data/proj/other"))
        );
        assert_eq!(
            resolve_answer("/abs/x.qptma", &suggestion, &req),
            Some(PathBuf::from("/abs/x.qptma"))
        );
    }
}
