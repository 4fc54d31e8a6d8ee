//! Template Catalog - seeds a [`TemplateEngine`] from its sources.
//!
//! Sources are installed in the order they were added, so a later source
//! replaces earlier templates of the same name (custom templates shadow
//! built-ins). Overrides run last: `name → target` re-registers `name` with
//! the body of `target`.

use std::collections::BTreeMap;

use tracing::{info, instrument, warn};

use crate::{
    application::{TemplateEngine, ports::TemplateSource},
    domain::TemplateSettings,
    error::QuillysoftResult,
};

/// What [`TemplateCatalog::install`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    /// Templates registered per source, in install order.
    pub loaded: Vec<(String, usize)>,
    /// Overrides that were applied.
    pub overrides_applied: usize,
    /// Overrides whose target was not registered.
    pub overrides_skipped: Vec<String>,
}

impl CatalogSummary {
    pub fn total_loaded(&self) -> usize {
        self.loaded.iter().map(|(_, n)| n).sum()
    }
}

/// Ordered template sources plus name overrides.
#[derive(Default)]
pub struct TemplateCatalog {
    sources: Vec<Box<dyn TemplateSource>>,
    overrides: BTreeMap<String, String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source. Later sources win on name clashes.
    pub fn with_source(mut self, source: Box<dyn TemplateSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Add an optional source; `None` is ignored.
    pub fn with_optional_source(self, source: Option<Box<dyn TemplateSource>>) -> Self {
        match source {
            Some(source) => self.with_source(source),
            None => self,
        }
    }

    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Take the overrides from a configuration's template settings.
    pub fn with_settings(self, settings: &TemplateSettings) -> Self {
        self.with_overrides(settings.template_overrides.clone())
    }

    /// Register every source's templates, then apply overrides.
    #[instrument(skip_all)]
    pub fn install(&self, engine: &TemplateEngine) -> QuillysoftResult<CatalogSummary> {
        let mut summary = CatalogSummary::default();

        for source in &self.sources {
            let templates = source.load()?;
            let count = templates.len();
            for template in templates {
                engine.register_template(template)?;
            }
            info!(source = %source.describe(), count, "templates registered");
            summary.loaded.push((source.describe(), count));
        }

        for (name, target) in &self.overrides {
            if !engine.exists(target) {
                warn!(%name, %target, "template override target is not registered, skipping");
                summary.overrides_skipped.push(name.clone());
                continue;
            }
            let replacement = engine.get(target)?.renamed(name.as_str())?;
            engine.register_template(replacement)?;
            summary.overrides_applied += 1;
        }

        Ok(summary)
    }
}
