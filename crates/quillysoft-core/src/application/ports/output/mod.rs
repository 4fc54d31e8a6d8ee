//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `quillysoft-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Model, Template};
use crate::error::QuillysoftResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `quillysoft_adapters::filesystem::LocalFilesystem` (production)
/// - `quillysoft_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - The working directory is part of the port so that upward searches can
///   be exercised without touching the process-wide current directory.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if a file or directory exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> QuillysoftResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> QuillysoftResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> QuillysoftResult<()>;

    /// Immediate children of a directory.
    fn list_dir(&self, path: &Path) -> QuillysoftResult<Vec<PathBuf>>;

    /// Directory relative lookups start from.
    fn current_dir(&self) -> QuillysoftResult<PathBuf>;
}

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `quillysoft_adapters::template_store::InMemoryStore`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get a template by name. `Ok(None)` when absent.
    fn get(&self, name: &str) -> QuillysoftResult<Option<Template>>;

    /// Insert or replace a template (last write wins).
    fn insert(&self, template: Template) -> QuillysoftResult<()>;

    /// Check whether a name is registered.
    fn contains(&self, name: &str) -> QuillysoftResult<bool>;

    /// All registered names, sorted.
    fn names(&self) -> QuillysoftResult<Vec<String>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `quillysoft_adapters::renderer::SimpleRenderer` (`{{Var}}`, `{{#if}}`, `{{#each}}`)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render a template body against a model.
    fn render(&self, body: &str, model: &Model) -> QuillysoftResult<String>;
}

/// Port for bulk template discovery.
///
/// Implemented by:
/// - `quillysoft_adapters::builtin_templates::BuiltinTemplates` (embedded)
/// - `quillysoft_adapters::template_loader::FilesystemTemplateLoader` (custom directory)
pub trait TemplateSource: Send + Sync {
    /// Short label used in logs.
    fn describe(&self) -> String;

    /// Load every template this source provides.
    fn load(&self) -> QuillysoftResult<Vec<Template>>;
}
