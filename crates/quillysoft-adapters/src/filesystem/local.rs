//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use quillysoft_core::{
    application::ports::Filesystem,
    error::{Context, QuillysoftResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Relative lookups start from the process working directory unless a
/// different base is given with [`LocalFilesystem::rooted_at`].
#[derive(Debug, Clone, Default)]
pub struct LocalFilesystem {
    working_dir: Option<PathBuf>,
}

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dir` as the working directory instead of the process one.
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> QuillysoftResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> QuillysoftResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> QuillysoftResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn list_dir(&self, path: &Path) -> QuillysoftResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;
        entries
            .map(|entry| {
                entry
                    .map(|e| e.path())
                    .map_err(|e| map_io_error(path, e, "read directory entry"))
            })
            .collect()
    }

    fn current_dir(&self) -> QuillysoftResult<PathBuf> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("Failed to determine working directory"),
        }
    }
}

fn map_io_error(
    path: &Path,
    e: io::Error,
    operation: &str,
) -> quillysoft_core::error::QuillysoftError {
    use quillysoft_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
