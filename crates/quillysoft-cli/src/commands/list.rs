//! Implementation of the `quillysoft list` command.

use serde::Serialize;

use quillysoft_core::domain::Configuration;

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One row of `list --format json`.
#[derive(Debug, Serialize)]
struct TemplateEntry<'a> {
    name: &'a str,
    #[serde(rename = "overriddenBy", skip_serializing_if = "Option::is_none")]
    overridden_by: Option<&'a str>,
}

pub fn execute(args: ListArgs, config: &Configuration, output: &OutputManager) -> CliResult<()> {
    let (engine, summary) = quillysoft_adapters::bootstrap(config)?;
    let names = engine.names()?;
    let overrides = &config.template_settings.template_overrides;

    let entries: Vec<TemplateEntry<'_>> = names
        .iter()
        .map(|name| TemplateEntry {
            name,
            overridden_by: overrides
                .get(name)
                .filter(|_| !summary.overrides_skipped.contains(name))
                .map(String::as_str),
        })
        .collect();

    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for entry in &entries {
                let line = match entry.overridden_by {
                    Some(target) => format!("  {:<20} -> {}", entry.name, target),
                    None => format!("  {}", entry.name),
                };
                output.print(&line)?;
            }
            for (source, count) in &summary.loaded {
                output.info(&format!("{count} template(s) from {source}"))?;
            }
        }

        ListFormat::List => {
            for entry in &entries {
                output.data_line(entry.name)?;
            }
        }

        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::encode("template list", e))?;
            output.data_line(&json)?;
        }
    }

    Ok(())
}
