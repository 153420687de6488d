//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::DEFAULT_ENDPOINT;
use crate::paths::DEFAULT_MANIFEST_FILE;

/// Modsync - declarative Steam Workshop mod synchronizer
///
/// Keep a local mods directory in sync with a YAML manifest of workshop ids.
#[derive(Parser, Debug)]
#[command(
    name = "modsync",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Declarative Steam Workshop mod synchronizer",
    long_about = "Modsync reconciles a local mods directory against a declarative YAML manifest \
                  of Steam Workshop item ids, fetching metadata and archives from a workshop \
                  catalog and writing the annotated manifest back.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  modsync init 1703611962 1717463209\n    \
                  modsync sync\n    \
                  modsync sync --dry-run\n    \
                  modsync sync --full --keep-going\n    \
                  modsync list"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile the mods directory against the manifest
    Sync(SyncArgs),

    /// List declared mods and their state
    List(ListArgs),

    /// Create a manifest from a seed list of workshop ids
    Init(InitArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Sync the default manifest:\n    modsync sync\n\n\
                  Preview without downloading:\n    modsync sync --dry-run\n\n\
                  Rebuild the mods directory from scratch:\n    modsync sync --full\n\n\
                  Keep going past individual download failures:\n    modsync sync --keep-going\n\n\
                  Sync an explicit manifest and target:\n    modsync sync -m ./mods.yaml -t ./mods/Local")]
pub struct SyncArgs {
    /// Manifest file path
    #[arg(
        long,
        short = 'm',
        value_name = "FILE",
        env = "MODSYNC_MANIFEST",
        default_value = DEFAULT_MANIFEST_FILE
    )]
    pub manifest: PathBuf,

    /// Target mods directory (defaults to the game's local mods folder)
    #[arg(long, short = 't', value_name = "DIR", env = "MODSYNC_TARGET")]
    pub target: Option<PathBuf>,

    /// Workshop catalog endpoint
    #[arg(long, value_name = "URL", env = "MODSYNC_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Wipe and rebuild the target directory instead of updating it in place
    #[arg(long)]
    pub full: bool,

    /// Print the plan without downloading or touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Continue past per-mod download/extract failures and report them at the end
    #[arg(long)]
    pub keep_going: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List declared mods:\n    modsync list\n\n\
                  List from an explicit manifest:\n    modsync list -m ./mods.yaml")]
pub struct ListArgs {
    /// Manifest file path
    #[arg(
        long,
        short = 'm',
        value_name = "FILE",
        env = "MODSYNC_MANIFEST",
        default_value = DEFAULT_MANIFEST_FILE
    )]
    pub manifest: PathBuf,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Seed a manifest with two mods:\n    modsync init 1703611962 1717463209\n\n\
                  Overwrite an existing manifest:\n    modsync init 1703611962 --force")]
pub struct InitArgs {
    /// Workshop item ids to declare
    #[arg(value_name = "ID", num_args = 1.., required = true)]
    pub ids: Vec<u64>,

    /// Manifest file path
    #[arg(
        long,
        short = 'm',
        value_name = "FILE",
        env = "MODSYNC_MANIFEST",
        default_value = DEFAULT_MANIFEST_FILE
    )]
    pub manifest: PathBuf,

    /// Overwrite an existing manifest
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    modsync completions --shell bash > ~/.bash_completion.d/modsync\n\n\
                  Generate zsh completions:\n    modsync completions --shell zsh > ~/.zfunc/_modsync\n\n\
                  Generate fish completions:\n    modsync completions --shell fish > ~/.config/fish/completions/modsync.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
