//! Marker-syntax renderer.
//!
//! Supported markers:
//!
//! - `{{Field}}` replaced by the field's text
//! - `{{#if Field}} … {{/if}}` kept when `Field` is truthy, removed otherwise
//! - `{{#each Field}} … {{/each}}` repeated per item of a list field, with
//!   `{{ItemField}}` markers resolved against the current item
//!
//! Passes run in that order, each over the output of the previous one.
//! Regions are matched lazily and do not nest: an inner `{{/if}}` closes the
//! outer `{{#if}}`. Markers that name no model field are left as written.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::{instrument, trace};

use quillysoft_core::{application::ports::TemplateRenderer, domain::Model, error::QuillysoftResult};

/// Renderer for the `{{…}}` marker syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(bytes = body.len()))]
    fn render(&self, body: &str, model: &Model) -> QuillysoftResult<String> {
        Ok(render_content(body, model))
    }
}

/// Run all three passes over `body`.
pub fn render_content(body: &str, model: &Model) -> String {
    let substituted = substitute(body, model);
    let conditioned = expand_conditionals(&substituted, model);
    expand_loops(&conditioned, model)
}

/// Flat `{{Field}}` substitution, one field at a time in model order.
fn substitute(text: &str, model: &Model) -> String {
    model.fields().fold(text.to_string(), |acc, (name, value)| {
        let marker = format!("{{{{{name}}}}}");
        if acc.contains(&marker) {
            acc.replace(&marker, &value.to_text())
        } else {
            acc
        }
    })
}

fn expand_conditionals(text: &str, model: &Model) -> String {
    if_block()
        .replace_all(text, |caps: &Captures<'_>| {
            let field = &caps[1];
            let keep = model.get(field).is_some_and(|v| v.is_truthy());
            trace!(field, keep, "conditional region");
            if keep { caps[2].to_string() } else { String::new() }
        })
        .into_owned()
}

fn expand_loops(text: &str, model: &Model) -> String {
    each_block()
        .replace_all(text, |caps: &Captures<'_>| {
            let field = &caps[1];
            let body = &caps[2];
            match model.get(field).and_then(|v| v.as_list()) {
                Some(items) => {
                    trace!(field, items = items.len(), "loop region");
                    items.iter().map(|item| substitute(body, item)).collect()
                }
                None => String::new(),
            }
        })
        .into_owned()
}

fn if_block() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)\{\{#if\s+(\w+)\s*\}\}(.*?)\{\{/if\}\}").expect("Invalid regex")
    })
}

fn each_block() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)\{\{#each\s+(\w+)\s*\}\}(.*?)\{\{/each\}\}").expect("Invalid regex")
    })
}
