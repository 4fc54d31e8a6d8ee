//! Terminal output.
//!
//! Status lines (`success`, `warning`, …) are decoration and respect
//! `--quiet`. Command results written with [`OutputManager::data`] are never
//! suppressed, so `quillysoft -q render entity > Order.cs` still works.

use std::io::IsTerminal;

use console::Term;
use owo_colors::{OwoColorize, Style};

use crate::{
    cli::global::{GlobalArgs, OutputFormat},
    error::{CliContext, CliResult},
};

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    colored: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            format,
            quiet: args.quiet,
            colored: format == OutputFormat::Human && !args.no_color,
            term: Term::stdout(),
        }
    }

    /// Command result, written as-is.
    pub fn data(&self, text: &str) -> CliResult<()> {
        self.term
            .write_str(text)
            .and_then(|()| self.term.flush())
            .cli_context(|| "Failed to write to stdout")
    }

    /// Command result followed by a newline.
    pub fn data_line(&self, line: &str) -> CliResult<()> {
        self.term
            .write_line(line)
            .cli_context(|| "Failed to write to stdout")
    }

    pub fn print(&self, msg: &str) -> CliResult<()> {
        self.status(None, msg, Style::new())
    }

    pub fn success(&self, msg: &str) -> CliResult<()> {
        self.status(Some('\u{2713}'), msg, Style::new().green())
    }

    pub fn warning(&self, msg: &str) -> CliResult<()> {
        self.status(Some('\u{26a0}'), msg, Style::new().yellow())
    }

    pub fn info(&self, msg: &str) -> CliResult<()> {
        self.status(Some('\u{2139}'), msg, Style::new().blue())
    }

    pub fn header(&self, text: &str) -> CliResult<()> {
        self.status(None, text, Style::new().cyan().bold())
    }

    pub fn supports_color(&self) -> bool {
        self.colored
    }

    /// Resolved format; never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn status(&self, symbol: Option<char>, msg: &str, style: Style) -> CliResult<()> {
        if self.quiet {
            return Ok(());
        }
        let line = self.decorate(symbol, msg, style);
        self.term
            .write_line(&line)
            .cli_context(|| "Failed to write to stdout")
    }

    fn decorate(&self, symbol: Option<char>, msg: &str, style: Style) -> String {
        match (symbol, self.colored) {
            (None, false) => msg.to_owned(),
            (None, true) => msg.style(style).to_string(),
            (Some(symbol), false) => format!("{symbol} {msg}"),
            (Some(symbol), true) => format!(
                "{} {}",
                symbol.style(style.bold()),
                msg.style(style)
            ),
        }
    }
}
