//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.
//! Running the binary without a subcommand behaves like `generate`.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// schemadoc - documentation generator for Oracle table dumps
///
/// Parses `TABLE:` block dumps of the NDC PLUS and Legacy databases and
/// writes JSON schema documents, Markdown with Mermaid diagrams, and
/// optional DDL.
#[derive(Parser, Debug)]
#[command(
    name = "schemadoc",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHEMADOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run (defaults to `generate`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse the NDC PLUS dump and write the JSON and Markdown documentation
    Generate(GenerateArgs),

    /// Parse a dump and print a summary of what was found
    Inspect(InspectArgs),

    /// Build the combined NDC PLUS and Legacy schema document
    Dual(DualArgs),

    /// Refresh the schema data embedded in the HTML viewer
    Viewer(ViewerArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug, Default)]
pub struct GenerateArgs {
    /// Table dump to parse (default: NDC_PLUS_tables.txt)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory receiving the generated files (default: schema)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Also write CREATE TABLE statements
    #[arg(long)]
    pub ddl: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Table dump to parse (default: NDC_PLUS_tables.txt)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Show the columns and relationships of one table
    #[arg(short, long, value_name = "NAME")]
    pub table: Option<String>,
}

/// Arguments for the dual command
#[derive(Parser, Debug)]
pub struct DualArgs {
    /// NDC PLUS table dump (default: NDC_PLUS_tables.txt)
    #[arg(long, value_name = "PATH")]
    pub ndc: Option<PathBuf>,

    /// Legacy table dump (default: Legacy_tables.txt)
    #[arg(long, value_name = "PATH")]
    pub legacy: Option<PathBuf>,

    /// Where to write the combined document (default: schema/dual_schema.json)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// HTML viewer whose embedded data should be refreshed
    #[arg(long, value_name = "HTML")]
    pub viewer: Option<PathBuf>,
}

/// Arguments for the viewer command
#[derive(Parser, Debug)]
pub struct ViewerArgs {
    /// Existing dual schema document
    #[arg(long, value_name = "JSON")]
    pub schema: PathBuf,

    /// HTML viewer to update in place
    #[arg(long, value_name = "HTML")]
    pub html: PathBuf,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a project config (.schemadoc.toml) with default values
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the config file
    #[arg(long, value_name = "PATH", default_value = ".schemadoc.toml")]
    pub path: PathBuf,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
