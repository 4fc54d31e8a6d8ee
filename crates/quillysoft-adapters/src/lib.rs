//! Infrastructure adapters for QuillySoft.
//!
//! This crate implements the ports defined in `quillysoft-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use builtin_templates::BuiltinTemplates;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;

use std::path::PathBuf;

use tracing::{debug, instrument};

use quillysoft_core::{
    application::{CatalogSummary, TemplateCatalog, TemplateEngine, ports::TemplateSource},
    domain::Configuration,
    error::QuillysoftResult,
};

/// Engine over an empty [`InMemoryStore`] and the [`SimpleRenderer`].
pub fn empty_engine() -> TemplateEngine {
    TemplateEngine::new(Box::new(InMemoryStore::new()), Box::new(SimpleRenderer::new()))
}

/// Directory custom templates are loaded from, if enabled.
///
/// Relative paths are resolved against the project root.
pub fn custom_templates_dir(config: &Configuration) -> Option<PathBuf> {
    let settings = &config.template_settings;
    if !settings.enable_custom_templates {
        return None;
    }
    settings
        .custom_templates_path
        .as_ref()
        .map(|path| config.project_paths.resolve(path))
}

/// The template catalog a configuration describes: built-ins, then the
/// custom directory (if enabled), then the overrides.
pub fn catalog_for(config: &Configuration) -> TemplateCatalog {
    let custom = custom_templates_dir(config)
        .map(|dir| Box::new(FilesystemTemplateLoader::new(dir)) as Box<dyn TemplateSource>);

    TemplateCatalog::new()
        .with_source(Box::new(BuiltinTemplates))
        .with_optional_source(custom)
        .with_settings(&config.template_settings)
}

/// Build a ready-to-use engine for `config`.
#[instrument(skip_all)]
pub fn bootstrap(config: &Configuration) -> QuillysoftResult<(TemplateEngine, CatalogSummary)> {
    let engine = empty_engine();
    let summary = catalog_for(config).install(&engine)?;
    debug!(
        total = summary.total_loaded(),
        overrides = summary.overrides_applied,
        "template engine ready"
    );
    Ok((engine, summary))
}
