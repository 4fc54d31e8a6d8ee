//! `quillysoft init`: write a default or sample configuration file.

use std::path::PathBuf;

use quillysoft_adapters::LocalFilesystem;
use quillysoft_core::{
    application::ConfigResolver,
    domain::{CONFIG_FILE_NAME, Configuration},
};

use crate::{
    cli::InitArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: InitArgs, output: &OutputManager) -> CliResult<()> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if path.exists() && !args.force {
        return Err(CliError::ConfigExists { path });
    }

    let config = initial_configuration(&args);
    let written = ConfigResolver::new(Box::new(LocalFilesystem::new())).save(&config, Some(&path))?;

    output.success(&format!("Configuration written to {}", written.display()))?;
    if args.sample {
        output.info("Sample values are placeholders; edit projectInfo before generating code.")?;
    }

    Ok(())
}

fn initial_configuration(args: &InitArgs) -> Configuration {
    if args.sample {
        Configuration::sample()
    } else {
        Configuration::default()
    }
}
