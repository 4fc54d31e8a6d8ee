//! Template Engine - named template registry plus rendering.
//!
//! The engine composes two ports:
//! 1. a [`TemplateStore`] holding the name → template registry
//! 2. a [`TemplateRenderer`] implementing the marker syntax
//!
//! ## Error policy
//!
//! - Unknown template name → `ApplicationError::TemplateNotFound`.
//! - Anything else that fails while reading the registry or rendering is
//!   wrapped into `ApplicationError::TemplateRender` carrying the template name.
//! - Missing or mismatched model fields are not errors; the renderer resolves
//!   them to empty / falsy.

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{TemplateRenderer, TemplateStore},
    },
    domain::{Renderable, Template},
    error::{QuillysoftError, QuillysoftResult},
};

/// Template registry and renderer.
pub struct TemplateEngine {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
}

impl TemplateEngine {
    /// Create an engine over the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use quillysoft_core::application::TemplateEngine;
    ///
    /// let engine = TemplateEngine::new(
    ///     store,    // impl TemplateStore
    ///     renderer, // impl TemplateRenderer
    /// );
    /// ```
    pub fn new(store: Box<dyn TemplateStore>, renderer: Box<dyn TemplateRenderer>) -> Self {
        Self { store, renderer }
    }

    /// Register (or replace) a template.
    pub fn register(&self, name: impl Into<String>, body: impl Into<String>) -> QuillysoftResult<()> {
        self.register_template(Template::new(name, body)?)
    }

    /// Register an already built template.
    pub fn register_template(&self, template: Template) -> QuillysoftResult<()> {
        debug!(name = %template, "registering template");
        self.store.insert(template)
    }

    /// Check whether a template is registered.
    ///
    /// A store failure is logged and reported as "not registered".
    pub fn exists(&self, name: &str) -> bool {
        self.store.contains(name).unwrap_or_else(|e| {
            warn!(name, error = %e, "template store lookup failed");
            false
        })
    }

    /// Fetch a registered template.
    pub fn get(&self, name: &str) -> QuillysoftResult<Template> {
        match self.store.get(name) {
            Ok(Some(template)) => Ok(template),
            Ok(None) => Err(ApplicationError::TemplateNotFound { name: name.into() }.into()),
            Err(e) => Err(ApplicationError::render(name, e).into()),
        }
    }

    /// Names of all registered templates, sorted.
    pub fn names(&self) -> QuillysoftResult<Vec<String>> {
        self.store.names()
    }

    /// Render a registered template against a model.
    #[instrument(skip(self, model))]
    pub fn render<M>(&self, name: &str, model: &M) -> QuillysoftResult<String>
    where
        M: Renderable + ?Sized,
    {
        let template = self.get(name)?;
        self.render_content(template.body(), model, name)
    }

    /// Render an ad-hoc body. `diagnostic_name` only appears in errors.
    #[instrument(skip(self, body, model))]
    pub fn render_content<M>(
        &self,
        body: &str,
        model: &M,
        diagnostic_name: &str,
    ) -> QuillysoftResult<String>
    where
        M: Renderable + ?Sized,
    {
        let model = model.to_model();
        debug!(fields = model.len(), bytes = body.len(), "rendering");

        self.renderer
            .render(body, &model)
            .map_err(|e| wrap_render_error(diagnostic_name, e))
    }
}

fn wrap_render_error(template_name: &str, err: QuillysoftError) -> QuillysoftError {
    match err {
        QuillysoftError::Application(ApplicationError::TemplateRender { .. }) => err,
        other => ApplicationError::render(template_name, other).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockTemplateRenderer, MockTemplateStore};
    use crate::domain::Model;

    fn echo_renderer() -> MockTemplateRenderer {
        let mut r = MockTemplateRenderer::new();
        r.expect_render().returning(|body, _| Ok(body.to_string()));
        r
    }

    #[test]
    fn render_missing_template_is_not_found() {
        let mut store = MockTemplateStore::new();
        store
            .expect_get()
            .withf(|name| name == "doesNotExist")
            .returning(|_| Ok(None));

        let engine = TemplateEngine::new(Box::new(store), Box::new(echo_renderer()));
        let err = engine.render("doesNotExist", &Model::new()).unwrap_err();

        assert!(err.is_template_not_found());
    }

    #[test]
    fn store_failure_is_wrapped_with_template_name() {
        let mut store = MockTemplateStore::new();
        store
            .expect_get()
            .returning(|_| Err(ApplicationError::StoreLockError.into()));

        let engine = TemplateEngine::new(Box::new(store), Box::new(echo_renderer()));
        let err = engine.render("entity", &Model::new()).unwrap_err();

        match err {
            QuillysoftError::Application(ApplicationError::TemplateRender {
                template_name,
                cause,
            }) => {
                assert_eq!(template_name, "entity");
                assert!(matches!(
                    *cause,
                    QuillysoftError::Application(ApplicationError::StoreLockError)
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn renderer_failure_uses_diagnostic_name() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|_, _| {
            Err(QuillysoftError::Internal {
                message: "boom".into(),
            })
        });

        let engine = TemplateEngine::new(Box::new(MockTemplateStore::new()), Box::new(renderer));
        let err = engine
            .render_content("{{X}}", &Model::new(), "adhoc.tmpl")
            .unwrap_err();

        assert!(matches!(
            err,
            QuillysoftError::Application(ApplicationError::TemplateRender { ref template_name, .. })
                if template_name == "adhoc.tmpl"
        ));
    }

    #[test]
    fn already_wrapped_errors_are_not_wrapped_twice() {
        let inner = ApplicationError::render("inner", ApplicationError::StoreLockError);
        let err = wrap_render_error("outer", inner.into());
        assert!(matches!(
            err,
            QuillysoftError::Application(ApplicationError::TemplateRender { ref template_name, .. })
                if template_name == "inner"
        ));
    }

    #[test]
    fn register_rejects_empty_name() {
        let engine = TemplateEngine::new(
            Box::new(MockTemplateStore::new()),
            Box::new(MockTemplateRenderer::new()),
        );
        assert!(matches!(
            engine.register("", "body"),
            Err(QuillysoftError::Domain(_))
        ));
    }

    #[test]
    fn exists_treats_store_failure_as_absent() {
        let mut store = MockTemplateStore::new();
        store
            .expect_contains()
            .returning(|_| Err(ApplicationError::StoreLockError.into()));

        let engine = TemplateEngine::new(Box::new(store), Box::new(MockTemplateRenderer::new()));
        assert!(!engine.exists("entity"));
    }

    #[test]
    fn render_passes_model_fields_to_renderer() {
        let mut store = MockTemplateStore::new();
        store
            .expect_get()
            .returning(|name| Ok(Some(Template::new(name, "body").unwrap())));

        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .withf(|body, model| body == "body" && model.get("Name").is_some())
            .returning(|_, _| Ok("rendered".into()));

        let engine = TemplateEngine::new(Box::new(store), Box::new(renderer));
        let out = engine
            .render("entity", &Model::new().with("Name", "Order"))
            .unwrap();
        assert_eq!(out, "rendered");
    }
}
