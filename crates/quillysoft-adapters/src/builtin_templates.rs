//! Built-in templates.
//!
//! The templates that ship with QuillySoft live in `templates/*.tmpl` next to
//! this crate's manifest and are compiled into the binary, so rendering never
//! depends on files being installed alongside the executable.
//!
//! A template's name is its file stem: `audited-entity.tmpl` registers as
//! `audited-entity`.
//!
//! | Name             | Purpose                                   |
//! |------------------|-------------------------------------------|
//! | `entity`         | Plain domain entity with its properties   |
//! | `audited-entity` | Audited entity, optional domain event     |
//! | `repository`     | Repository interface for an entity        |
//! | `controller`     | Web API controller, optional permissions  |
//! | `unit-test`      | Test class skeleton for an entity         |

use tracing::{debug, instrument};

use quillysoft_core::{
    application::ports::TemplateSource,
    domain::{DomainError, Template},
    error::QuillysoftResult,
};

/// File suffix recognised as a template.
pub const TEMPLATE_EXTENSION: &str = "tmpl";

/// Embedded template files: `(file name, body)`.
const EMBEDDED: &[(&str, &str)] = &[
    ("entity.tmpl", include_str!("../templates/entity.tmpl")),
    (
        "audited-entity.tmpl",
        include_str!("../templates/audited-entity.tmpl"),
    ),
    ("repository.tmpl", include_str!("../templates/repository.tmpl")),
    ("controller.tmpl", include_str!("../templates/controller.tmpl")),
    ("unit-test.tmpl", include_str!("../templates/unit-test.tmpl")),
];

/// Template name for a file name, `None` if it lacks the `.tmpl` suffix.
pub fn template_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(TEMPLATE_EXTENSION)
        .and_then(|rest| rest.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}

/// Build templates from `(file name, body)` pairs, ignoring non-template files.
pub fn templates_from_files<'a>(
    files: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<Vec<Template>, DomainError> {
    files
        .into_iter()
        .filter_map(|(file, body)| template_name(file).map(|name| (name, body)))
        .map(|(name, body)| Template::new(name, body))
        .collect()
}

/// All built-in templates.
#[instrument]
pub fn all_templates() -> Result<Vec<Template>, DomainError> {
    let templates = templates_from_files(EMBEDDED.iter().copied())?;
    debug!(count = templates.len(), "built-in templates loaded");
    Ok(templates)
}

/// [`TemplateSource`] over the embedded templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
    fn describe(&self) -> String {
        "built-in".to_string()
    }

    fn load(&self) -> QuillysoftResult<Vec<Template>> {
        Ok(all_templates()?)
    }
}
