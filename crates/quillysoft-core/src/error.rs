//! Crate-wide error type.
//!
//! [`QuillysoftError`] is what every public operation returns. It wraps the
//! layer errors and adds two catch-alls for configuration and environment
//! problems. Callers use [`QuillysoftError::category`] to pick an exit code and
//! [`QuillysoftError::suggestions`] for hints.

use thiserror::Error;

use crate::{application::ApplicationError, domain};

#[derive(Debug, Error, Clone)]
pub enum QuillysoftError {
    #[error("Domain error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The environment misbehaved (no working directory, and similar).
    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type QuillysoftResult<T> = Result<T, QuillysoftError>;

/// Coarse classification, mapped to exit codes by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

impl From<domain::ErrorCategory> for ErrorCategory {
    fn from(category: domain::ErrorCategory) -> Self {
        match category {
            domain::ErrorCategory::Validation => Self::Validation,
            domain::ErrorCategory::NotFound => Self::NotFound,
        }
    }
}

impl QuillysoftError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(inner) => inner.suggestions(),
            Self::Application(inner) => inner.suggestions(),
            Self::Configuration { .. } => vec![
                "Fix quillysoft-cli.json or regenerate it with 'quillysoft init --force'".into(),
            ],
            Self::Internal { .. } => vec![
                "This may be a bug in QuillySoft".into(),
                "Re-run with -vv and report the log output".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(inner) => inner.category().into(),
            Self::Application(inner) => inner.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn is_template_not_found(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::TemplateNotFound { .. })
        )
    }
}

/// Turn a foreign error into [`QuillysoftError::Internal`] with a prefix.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> QuillysoftResult<T>;
}

impl<T, E: std::error::Error> Context<T> for Result<T, E> {
    fn context(self, msg: impl Into<String>) -> QuillysoftResult<T> {
        self.map_err(|e| QuillysoftError::Internal {
            message: format!("{}: {e}", msg.into()),
        })
    }
}
