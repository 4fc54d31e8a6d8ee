//! Failures while orchestrating ports: lookups, rendering, file access.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, QuillysoftError};

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No template registered under the requested name.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Rendering failed for a reason other than a missing template.
    #[error("Failed to render template '{template_name}'")]
    TemplateRender {
        template_name: String,
        #[source]
        cause: Box<QuillysoftError>,
    },

    #[error("Cannot access {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A writer panicked while holding the store or filesystem lock.
    #[error("Template store lock poisoned")]
    StoreLockError,

    /// Configuration could not be serialized for saving.
    #[error("Failed to serialize configuration: {reason}")]
    ConfigSerialization { reason: String },
}

impl ApplicationError {
    /// Wrap any failure raised while rendering `template_name`.
    pub fn render(template_name: impl Into<String>, cause: impl Into<QuillysoftError>) -> Self {
        Self::TemplateRender {
            template_name: template_name.into(),
            cause: Box::new(cause.into()),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("No template named '{}' is registered", name),
                "Try: quillysoft list to see available templates".into(),
                "Custom templates need enableCustomTemplates and customTemplatesPath".into(),
            ],
            Self::TemplateRender { cause, .. } => cause.suggestions(),
            Self::FilesystemError { path, .. } => vec![
                format!("Check that '{}' exists and is accessible", path.display()),
            ],
            Self::StoreLockError => vec![
                "A previous operation panicked; re-run the command".into(),
            ],
            Self::ConfigSerialization { .. } => vec![
                "A value under the extension keys could not be written as JSON".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::TemplateRender { cause, .. } => cause.category(),
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::ConfigSerialization { .. } => ErrorCategory::Configuration,
        }
    }
}
