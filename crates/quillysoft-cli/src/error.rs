//! CLI error type and its presentation on stderr.
//!
//! Every failure a command can produce ends up as a [`CliError`]. The error
//! knows its [`ExitStatus`], a few hints for the user, and how to print itself
//! with or without colour.

use std::error::Error as StdError;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;
use tracing::{debug, error, warn};

use quillysoft_core::error::{ErrorCategory, QuillysoftError};

pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad `--set` pair, model file that is not an object, and similar.
    #[error("Invalid input: {message}")]
    Usage {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// `init` target exists and `--force` was not given.
    #[error("Configuration already exists at {}", .path.display())]
    ConfigExists { path: PathBuf },

    /// Something we produced could not be encoded for output.
    #[error("Failed to encode {what}")]
    Encode {
        what: String,
        #[source]
        source: BoxedSource,
    },

    #[error("{0}")]
    Core(#[from] QuillysoftError),

    #[error("{action}")]
    Io {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

/// Process exit status for a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Internal = 1,
    Usage = 2,
    NotFound = 3,
    Configuration = 4,
}

impl From<ErrorCategory> for ExitStatus {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Validation => Self::Usage,
            ErrorCategory::NotFound => Self::NotFound,
            ErrorCategory::Configuration => Self::Configuration,
            ErrorCategory::Internal => Self::Internal,
        }
    }
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            source: None,
        }
    }

    pub fn encode(what: impl Into<String>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Encode {
            what: what.into(),
            source: Box::new(source),
        }
    }

    pub fn status(&self) -> ExitStatus {
        match self {
            Self::Usage { .. } | Self::ConfigExists { .. } => ExitStatus::Usage,
            Self::Core(core) => core.category().into(),
            Self::Encode { .. } | Self::Io { .. } => ExitStatus::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.status() as u8
    }

    /// Hints printed under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Usage { .. } => vec!["Run with --help to see the expected arguments".into()],
            Self::ConfigExists { .. } => vec![
                "Pass --force to replace it".into(),
                "Or write somewhere else with --path".into(),
            ],
            Self::Encode { .. } => vec!["Re-run with -vv and report the log output".into()],
            Self::Core(core) => core.suggestions(),
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => {
                vec!["Check the file permissions".into()]
            }
            Self::Io { .. } => vec!["Check that the path exists and is writable".into()],
        }
    }

    /// Underlying causes, outermost first.
    fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(self.source(), |&err| err.source())
    }

    /// Text written to stderr when a command fails.
    pub fn report(&self, verbose: bool, colored: bool) -> String {
        let paint = |text: &str, style: Style| {
            if colored {
                text.style(style).to_string()
            } else {
                text.to_string()
            }
        };

        let mut lines = vec![
            String::new(),
            format!(
                "{} {}",
                paint("Error:", Style::new().red().bold()),
                paint(&self.to_string(), Style::new().red())
            ),
        ];

        if verbose {
            lines.extend(
                self.causes()
                    .map(|cause| format!("  {} {cause}", paint("caused by:", Style::new().dimmed()))),
            );
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            lines.push(String::new());
            lines.push(paint("Suggestions:", Style::new().yellow().bold()));
            lines.extend(hints.iter().map(|hint| format!("  - {hint}")));
        }

        if !verbose && self.source().is_some() {
            lines.push(String::new());
            lines.push(paint("Re-run with --verbose to see the cause.", Style::new().dimmed()));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    pub fn log(&self) {
        let status = self.status();
        match status {
            ExitStatus::Usage | ExitStatus::NotFound => warn!(?status, error = %self, "command failed"),
            ExitStatus::Configuration | ExitStatus::Internal => {
                error!(?status, error = %self, "command failed")
            }
        }
        for cause in self.causes() {
            debug!(%cause, "caused by");
        }
    }
}

/// Attach a message to a foreign error while converting it to [`CliError`].
pub trait CliContext<T> {
    fn cli_context<S: Into<String>>(self, message: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> CliContext<T> for Result<T, std::io::Error> {
    fn cli_context<S: Into<String>>(self, message: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|source| CliError::Io {
            action: message().into(),
            source,
        })
    }
}

impl<T> CliContext<T> for Result<T, serde_json::Error> {
    fn cli_context<S: Into<String>>(self, message: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|e| CliError::Usage {
            message: format!("{}: {e}", message().into()),
            source: Some(Box::new(e)),
        })
    }
}
