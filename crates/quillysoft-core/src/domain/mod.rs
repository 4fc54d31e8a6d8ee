// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for QuillySoft.
//!
//! This module contains pure data and rules with no I/O.
//! Template storage, rendering and file access are reached through ports
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few crates**: std, thiserror, and serde for the configuration file shape
//! - **Plain values**: All domain objects are Clone + PartialEq
//!
pub mod configuration;
pub mod error;
pub mod model;
pub mod template;

pub use configuration::{
    CONFIG_FILE_NAME, CodeGenerationSettings, Configuration, EntityType, ProjectInfo,
    ProjectPaths, ProjectType, RESERVED_KEYS, TemplateSettings,
};
pub use error::{DomainError, ErrorCategory};
pub use model::{Model, Renderable, Value};
pub use template::Template;
