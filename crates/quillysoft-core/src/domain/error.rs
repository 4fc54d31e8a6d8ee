//! Rule violations raised by domain values.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Template name must not be empty")]
    EmptyTemplateName,

    #[error("Unknown project type '{0}'")]
    UnknownProjectType(String),

    #[error("Unknown entity type '{0}'")]
    UnknownEntityType(String),

    /// Lookup of a dotted configuration key that does not exist.
    #[error("Unknown configuration key '{key}'")]
    UnknownSetting { key: String },
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyTemplateName => vec![
                "Give the template a non-empty name".into(),
                "Built-in templates are named after their file stem".into(),
            ],
            Self::UnknownProjectType(value) => vec![
                format!("'{}' is not a known project type", value),
                "Known types: CleanArchitecture, OnionArchitecture, MinimalApi, Microservice"
                    .into(),
            ],
            Self::UnknownEntityType(value) => vec![
                format!("'{}' is not a known entity type", value),
                "Known types: Simple, Audited, FullyAudited, BaseEntity".into(),
            ],
            Self::UnknownSetting { key } => vec![
                format!("No setting named '{}'", key),
                "Keys are dotted camelCase paths, e.g. projectInfo.name".into(),
                "Try: quillysoft config show".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyTemplateName
            | Self::UnknownProjectType(_)
            | Self::UnknownEntityType(_) => ErrorCategory::Validation,
            Self::UnknownSetting { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
