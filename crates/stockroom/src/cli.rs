//! Clap derive structures for the `stockroom` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stockroom -- manage an item inventory from the command line
#[derive(Debug, Parser)]
#[command(
    name = "stockroom",
    version,
    about = "Manage your inventory items from the command line",
    long_about = "A CLI for the stockroom items API.\n\n\
        Lists, creates, updates and deletes items (name + price) on a\n\
        REST server. The same validation rules as the terminal UI apply.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "STOCKROOM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server origin, e.g. http://localhost:8000 (overrides profile)
    #[arg(long, short = 's', env = "STOCKROOM_SERVER", global = true)]
    pub server: Option<String>,

    /// API base: absolute URL, or a path resolved against the server
    #[arg(long, env = "STOCKROOM_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOCKROOM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "STOCKROOM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "STOCKROOM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, create, update and delete items
    #[command(alias = "i")]
    Items(ItemsArgs),

    /// Check server liveness or readiness
    Health(HealthArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Items ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ItemsArgs {
    #[command(subcommand)]
    pub command: ItemsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ItemsCommand {
    /// List one page of items
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single item
    Get {
        /// Item ID
        id: String,
    },

    /// Create an item
    #[command(alias = "add")]
    Create {
        /// Item name (1-255 characters)
        #[arg(long, short = 'n')]
        name: String,

        /// Price, a non-negative number
        #[arg(long, short = 'P', allow_hyphen_values = true)]
        price: String,
    },

    /// Update an item; omitted fields keep their current value
    #[command(alias = "edit")]
    Update {
        /// Item ID
        id: String,

        /// New name
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// New price
        #[arg(long, short = 'P', allow_hyphen_values = true)]
        price: Option<String>,
    },

    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Item ID
        id: String,
    },
}

/// Pagination arguments for `items list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// 1-based page number (pages are 20 items)
    #[arg(long, conflicts_with = "offset")]
    pub page: Option<u64>,

    /// Raw item offset
    #[arg(long)]
    pub offset: Option<u64>,
}

// ── Health ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Check readiness (database reachable) instead of liveness
    #[arg(long)]
    pub ready: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the effective configuration
    Show,

    /// Write a config file with a profile for the given server
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Overwrite an existing profile of the same name
        #[arg(long)]
        force: bool,
    },

    /// Set a key on the active profile (server, api_url, insecure, timeout)
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
