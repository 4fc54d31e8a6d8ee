//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "render a template" or "load the configuration".

pub mod config_resolver;
pub mod template_catalog;
pub mod template_engine;

pub use config_resolver::{ConfigResolver, ConfigSource, LoadedConfiguration};
pub use template_catalog::{CatalogSummary, TemplateCatalog};
pub use template_engine::TemplateEngine;
