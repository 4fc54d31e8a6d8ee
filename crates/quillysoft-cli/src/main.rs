//! # QuillySoft CLI
//!
//! Template-driven code generation for layered solutions.
//!
//! `main` loads `.env`, parses arguments, installs logging, resolves
//! `quillysoft-cli.json` (explicit `--config`, upward search, then defaults)
//! and hands the result to one command handler. Failures are printed once, on
//! stderr, and mapped to an exit code:
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::{io::IsTerminal, process::ExitCode};

use clap::Parser;
use tracing::{debug, info, instrument};

use quillysoft_adapters::LocalFilesystem;
use quillysoft_core::application::{ConfigResolver, ConfigSource, LoadedConfiguration};

use crate::{
    cli::{Cli, Commands},
    error::CliResult,
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version come through here with a zero status.
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e:#}");
        return ExitCode::from(1);
    }
    debug!(global = ?cli.global, "arguments parsed");

    let loaded = ConfigResolver::new(Box::new(LocalFilesystem::new()))
        .load_with_source(cli.global.config.as_deref());
    match &loaded.source {
        ConfigSource::File(path) => info!(path = %path.display(), "using configuration file"),
        ConfigSource::Defaults => info!("using default configuration"),
    }

    let output = OutputManager::new(&cli.global);
    let verbose = cli.global.verbose > 0;
    let colored = output.supports_color() && std::io::stderr().is_terminal();

    match run(cli, &loaded, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.log();
            eprint!("{}", err.report(verbose, colored));
            ExitCode::from(err.exit_code())
        }
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, loaded: &LoadedConfiguration, output: &OutputManager) -> CliResult<()> {
    let config = &loaded.configuration;
    match cli.command {
        Commands::Render(args) => commands::render::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, config, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, loaded, output),
    }
}
