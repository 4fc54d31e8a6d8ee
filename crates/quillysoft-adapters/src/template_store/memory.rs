//! In-memory template store.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use quillysoft_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::Template,
    error::QuillysoftResult,
};

/// Thread-safe in-memory template store.
///
/// Registering a name that already exists replaces the earlier template.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<HashMap<String, Template>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, name: &str) -> QuillysoftResult<Option<Template>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.get(name).cloned())
    }

    fn insert(&self, template: Template) -> QuillysoftResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(template.name().to_string(), template);
        Ok(())
    }

    fn contains(&self, name: &str) -> QuillysoftResult<bool> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.contains_key(name))
    }

    fn names(&self) -> QuillysoftResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut names: Vec<String> = inner.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, body: &str) -> Template {
        Template::new(name, body).unwrap()
    }

    #[test]
    fn insert_replaces_existing_name() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        store.insert(template("entity", "first")).unwrap();
        store.insert(template("entity", "second")).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("entity").unwrap().unwrap().body(), "second");
    }

    #[test]
    fn get_unknown_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());
        assert!(!store.contains("missing").unwrap());
    }

    #[test]
    fn names_are_sorted() {
        let store = InMemoryStore::new();
        store.insert(template("repository", "")).unwrap();
        store.insert(template("controller", "")).unwrap();
        store.insert(template("entity", "")).unwrap();

        assert_eq!(
            store.names().unwrap(),
            ["controller", "entity", "repository"]
        );
    }

    #[test]
    fn clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.insert(template("entity", "x")).unwrap();
        assert!(other.contains("entity").unwrap());
    }
}
