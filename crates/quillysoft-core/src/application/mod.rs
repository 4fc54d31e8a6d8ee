//! Application layer for QuillySoft.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateEngine, ConfigResolver, TemplateCatalog)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Data rules live in
//! `crate::domain`; the marker syntax itself is implemented by a
//! [`TemplateRenderer`] adapter.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CatalogSummary, ConfigResolver, ConfigSource, LoadedConfiguration, TemplateCatalog,
    TemplateEngine,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer, TemplateSource, TemplateStore};

pub use error::ApplicationError;
