//! `quillysoft config`: inspect the resolved configuration.

use quillysoft_core::{
    application::{ConfigSource, LoadedConfiguration},
    domain::Configuration,
};

use crate::{
    cli::{ConfigCommands, ConfigFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    loaded: &LoadedConfiguration,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show { format } => {
            output.data_line(&render(&loaded.configuration, format)?)?;
        }

        ConfigCommands::Get { key } => {
            let value = loaded
                .configuration
                .lookup(&key)
                .map_err(quillysoft_core::error::QuillysoftError::from)?;
            output.data_line(&display_value(&value))?;
        }

        ConfigCommands::Path => match &loaded.source {
            ConfigSource::File(path) => output.data_line(&path.display().to_string())?,
            ConfigSource::Defaults => {
                output.data_line("(defaults)")?;
                output.info("No quillysoft-cli.json found; run 'quillysoft init' to create one.")?;
            }
        },
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn render(config: &Configuration, format: ConfigFormat) -> CliResult<String> {
    match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| CliError::encode("configuration as JSON", e)),
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| CliError::encode("configuration as TOML", e)),
    }
}

/// Strings print bare; everything else as compact JSON.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
