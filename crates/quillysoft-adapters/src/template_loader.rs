//! Filesystem-based template loader.
//!
//! Loads custom templates from a directory tree. Every `*.tmpl` file found
//! under the directory (at any depth) becomes a template named after its file
//! stem; other files are ignored.
//!
//! # Directory layout expected
//!
//! ```text
//! .quillysoft/templates/
//! ├── entity.tmpl          ← replaces the built-in `entity`
//! ├── dto.tmpl             ← new template `dto`
//! └── web/
//!     └── controller.tmpl  ← `controller`
//! ```
//!
//! Entries are visited in file-name order, so when two files share a stem the
//! one visited last wins.
//!
//! # Failure policy
//!
//! Custom templates are optional. A missing directory yields no templates, and
//! a file or directory entry that cannot be read is skipped with a `WARN`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use quillysoft_core::{application::ports::TemplateSource, domain::Template, error::QuillysoftResult};

use crate::builtin_templates::template_name;

/// Loads `*.tmpl` files from a directory.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    /// Create a loader rooted at `templates_dir`.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Directory this loader reads from.
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every template under the directory.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Vec<Template> {
        if !self.templates_dir.is_dir() {
            warn!("custom templates directory not found, skipping");
            return Vec::new();
        }

        let mut templates = Vec::new();

        for entry in WalkDir::new(&self.templates_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(name) = path
                .file_name()
                .and_then(|f| f.to_str())
                .and_then(template_name)
            else {
                continue;
            };

            match load_template(name, path) {
                Ok(template) => {
                    debug!(name, path = %path.display(), "loaded custom template");
                    templates.push(template);
                }
                Err(e) => {
                    // One bad file must not block the others.
                    warn!(
                        path  = %path.display(),
                        error = %e,
                        "skipping custom template due to load error"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading custom templates");
        templates
    }
}

fn load_template(name: &str, path: &Path) -> QuillysoftResult<Template> {
    let body = fs::read_to_string(path).map_err(|e| {
        quillysoft_core::application::ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to read template: {e}"),
        }
    })?;
    Ok(Template::new(name, body)?)
}

impl TemplateSource for FilesystemTemplateLoader {
    fn describe(&self) -> String {
        self.templates_dir.display().to_string()
    }

    fn load(&self) -> QuillysoftResult<Vec<Template>> {
        Ok(self.load_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write files under a fresh TempDir.
    fn make_dir(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (rel_path, content) in files {
            let full = temp.path().join(rel_path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
        temp
    }

    fn names(templates: &[Template]) -> Vec<&str> {
        templates.iter().map(Template::name).collect()
    }

    #[test]
    fn loads_tmpl_files_recursively() {
        let temp = make_dir(&[
            ("entity.tmpl", "custom {{EntityName}}"),
            ("web/controller.tmpl", "ctl"),
            ("notes.md", "ignored"),
        ]);

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all();

        assert_eq!(names(&templates), ["entity", "controller"]);
        assert_eq!(templates[0].body(), "custom {{EntityName}}");
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let loader = FilesystemTemplateLoader::new(temp.path().join("absent"));
        assert!(loader.load_all().is_empty());
        assert!(loader.load().unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_file_is_skipped() {
        let temp = make_dir(&[("good.tmpl", "ok")]);
        fs::write(temp.path().join("bad.tmpl"), [0xffu8, 0xfe, 0x00]).unwrap();

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all();

        assert_eq!(names(&templates), ["good"]);
    }

    #[test]
    fn describe_is_directory() {
        let loader = FilesystemTemplateLoader::new("/tmp/custom");
        assert_eq!(loader.describe(), "/tmp/custom");
        assert_eq!(loader.templates_dir(), Path::new("/tmp/custom"));
    }
}
