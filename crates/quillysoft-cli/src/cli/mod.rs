//! Command-line surface. Argument names, aliases and help text live here and
//! nowhere else.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "quillysoft",
    bin_name = "quillysoft",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Template-driven code generation for layered solutions",
    long_about = "QuillySoft renders entity, repository, controller and test \
                  templates against your project configuration \
                  (quillysoft-cli.json).",
    after_help = "EXAMPLES:\n\
        \x20 quillysoft init\n\
        \x20 quillysoft render entity --set EntityName=Order\n\
        \x20 quillysoft render controller --model order.json --output src/WebApi/OrderController.cs\n\
        \x20 quillysoft list\n\
        \x20 quillysoft completions bash > /usr/share/bash-completion/completions/quillysoft",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template against the project configuration.
    #[command(
        visible_alias = "r",
        about = "Render a template",
        after_help = "EXAMPLES:\n\
            \x20 quillysoft render entity --set EntityName=Order\n\
            \x20 quillysoft render entity --model order.json --set GenerateEvents=false\n\
            \x20 quillysoft render ./my.tmpl --file --output out.cs"
    )]
    Render(RenderArgs),

    /// List registered templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 quillysoft list\n\
            \x20 quillysoft list --format json"
    )]
    List(ListArgs),

    /// Write a configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 quillysoft init            # defaults in ./quillysoft-cli.json\n\
            \x20 quillysoft init --sample   # fully populated example\n\
            \x20 quillysoft init --path config/quillysoft-cli.json --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 quillysoft completions bash > ~/.local/share/bash-completion/completions/quillysoft\n\
            \x20 quillysoft completions zsh  > ~/.zfunc/_quillysoft\n\
            \x20 quillysoft completions fish > ~/.config/fish/completions/quillysoft.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the resolved configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 quillysoft config show\n\
            \x20 quillysoft config show --format toml\n\
            \x20 quillysoft config get projectInfo.namespace\n\
            \x20 quillysoft config path"
    )]
    Config(ConfigCommands),
}

// ── render ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Registered template name, or a template file with --file
    pub template: String,

    /// JSON object whose fields are added to the model
    #[arg(short, long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Set a model field; `true`/`false` become booleans (repeatable)
    #[arg(short, long, value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Treat TEMPLATE as the path of a template body
    #[arg(long)]
    pub file: bool,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Names with their overrides and a per-source summary
    Table,
    /// One name per line
    List,
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the fully populated sample instead of defaults
    #[arg(long)]
    pub sample: bool,

    /// Replace an existing file
    #[arg(short, long)]
    pub force: bool,

    /// Target file [default: ./quillysoft-cli.json]
    #[arg(short, long, value_name = "FILE")]
    pub path: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show {
        #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
        format: ConfigFormat,
    },
    /// Print one setting by dotted camelCase key, e.g. projectInfo.name
    Get { key: String },
    /// Print which configuration file is in use
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Toml,
}

// ── tests ─────────────────────────────────────────────────────────────────────
