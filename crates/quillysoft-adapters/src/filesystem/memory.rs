//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use quillysoft_core::{
    application::{ApplicationError, ports::Filesystem},
    error::QuillysoftResult,
};

/// In-memory filesystem for testing.
///
/// Writing a file registers all of its ancestors as directories, so an upward
/// search sees the same tree a real disk would.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    current_dir: PathBuf,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem rooted at `/`.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner {
                files: HashMap::new(),
                directories: HashSet::new(),
                current_dir: PathBuf::from("/"),
            })),
        }
    }

    /// Set the working directory (creating it).
    pub fn with_current_dir(self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Ok(mut inner) = self.inner.write() {
            add_directories(&mut inner.directories, &dir);
            inner.current_dir = dir;
        }
        self
    }

    /// Add a file, creating its parents (testing helper).
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                add_directories(&mut inner.directories, parent);
            }
            inner.files.insert(path, content.into());
        }
        self
    }

    /// Add a directory and its parents (testing helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            add_directories(&mut inner.directories, path.as_ref());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    fn read(&self) -> QuillysoftResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> QuillysoftResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn add_directories(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> QuillysoftResult<String> {
        self.read()?.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "File does not exist".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> QuillysoftResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> QuillysoftResult<()> {
        let mut inner = self.write()?;
        add_directories(&mut inner.directories, path);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> QuillysoftResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Directory does not exist".into(),
            }
            .into());
        }

        let mut children: Vec<PathBuf> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        children.sort();
        Ok(children)
    }

    fn current_dir(&self) -> QuillysoftResult<PathBuf> {
        Ok(self.read()?.current_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_file_creates_parent_directories() {
        let fs = MemoryFilesystem::new().with_file("/a/b/c.txt", "x");
        assert!(fs.exists(Path::new("/a")));
        assert!(fs.exists(Path::new("/a/b")));
        assert_eq!(fs.read_to_string(Path::new("/a/b/c.txt")).unwrap(), "x");
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/nope/file"), "x").is_err());

        fs.create_dir_all(Path::new("/yes")).unwrap();
        fs.write_file(Path::new("/yes/file"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/yes/file")).as_deref(), Some("x"));
    }

    #[test]
    fn list_dir_returns_direct_children_only() {
        let fs = MemoryFilesystem::new()
            .with_file("/repo/Shop.sln", "")
            .with_file("/repo/src/Api/Program.cs", "")
            .with_dir("/repo/.git");

        let children = fs.list_dir(Path::new("/repo")).unwrap();
        assert_eq!(
            children,
            vec![
                PathBuf::from("/repo/.git"),
                PathBuf::from("/repo/Shop.sln"),
                PathBuf::from("/repo/src"),
            ]
        );
    }

    #[test]
    fn current_dir_is_configurable() {
        let fs = MemoryFilesystem::new().with_current_dir("/work/app");
        assert_eq!(fs.current_dir().unwrap(), PathBuf::from("/work/app"));
        assert!(fs.exists(Path::new("/work")));
    }

    #[test]
    fn reading_missing_file_fails() {
        let fs = MemoryFilesystem::new();
        assert!(fs.read_to_string(Path::new("/missing")).is_err());
    }
}
