//! Template entity.

use std::fmt;

use crate::domain::DomainError;

/// A named template body.
///
/// Templates are immutable once built. Replacing a template means registering
/// a new one under the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    body: String,
}

impl Template {
    /// Create a template, rejecting an empty (or whitespace-only) name.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyTemplateName);
        }
        Ok(Self {
            name,
            body: body.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Re-key this template under another name, keeping the body.
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(name, self.body.clone())
    }

}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
