//! `quillysoft render`: render a template to stdout or a file.
//!
//! The model is assembled in layers, later layers replacing earlier fields:
//!
//! 1. configuration-derived fields (`ProjectName`, `Namespace`, `DomainPath`, …)
//! 2. `Year`
//! 3. the `--model` JSON object
//! 4. `--set KEY=VALUE` pairs, in order

use std::{fs, path::Path};

use chrono::Datelike;
use tracing::{debug, info, instrument};

use quillysoft_core::domain::{Configuration, Model, Renderable, Value};

use crate::{
    cli::RenderArgs,
    error::{CliContext, CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: RenderArgs, config: &Configuration, output: &OutputManager) -> CliResult<()> {
    let (engine, summary) = quillysoft_adapters::bootstrap(config)?;
    debug!(templates = summary.total_loaded(), "engine ready");

    let model = build_model(
        config,
        args.model.as_deref(),
        &args.set,
        chrono::Local::now().year(),
    )?;

    let text = if args.file {
        let body = fs::read_to_string(&args.template)
            .cli_context(|| format!("Failed to read template file '{}'", args.template))?;
        engine.render_content(&body, &model, &args.template)?
    } else {
        engine.render(&args.template, &model)?
    };

    match args.output {
        Some(path) => {
            write_output(&path, &text)?;
            output.success(&format!(
                "Rendered '{}' to {}",
                args.template,
                path.display()
            ))?;
        }
        None => output.data(&text)?,
    }

    Ok(())
}

/// Assemble the render model from every layer.
#[instrument(skip(config, sets))]
fn build_model(
    config: &Configuration,
    model_file: Option<&Path>,
    sets: &[String],
    year: i32,
) -> CliResult<Model> {
    let mut model = config.to_model();
    model.set("Year", year);

    if let Some(path) = model_file {
        model.merge(read_model_file(path)?);
    }

    for assignment in sets {
        let (key, value) = parse_assignment(assignment)?;
        model.set(key, value);
    }

    debug!(fields = model.len(), "model assembled");
    Ok(model)
}

fn read_model_file(path: &Path) -> CliResult<Model> {
    let text = fs::read_to_string(path)
        .cli_context(|| format!("Failed to read model file '{}'", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .cli_context(|| format!("Model file '{}' is not valid JSON", path.display()))?;

    if !json.is_object() {
        return Err(CliError::usage(format!(
            "Model file '{}' must contain a JSON object",
            path.display()
        )));
    }
    Ok(json.to_model())
}

/// Parse `KEY=VALUE`. `true` and `false` become booleans so they can drive
/// `{{#if}}` regions; everything else is text.
fn parse_assignment(assignment: &str) -> CliResult<(String, Value)> {
    let Some((key, value)) = assignment.split_once('=') else {
        return Err(CliError::usage(format!(
            "'{assignment}' is not KEY=VALUE"
        )));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::usage(format!(
            "'{assignment}' has an empty key"
        )));
    }

    let value = match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::from(other),
    };
    Ok((key.to_string(), value))
}

fn write_output(path: &Path, text: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .cli_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    fs::write(path, text)
        .cli_context(|| format!("Failed to write '{}'", path.display()))?;
    info!(path = %path.display(), bytes = text.len(), "output written");
    Ok(())
}
