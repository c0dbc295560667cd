//! Command-line interface for `itrack`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use crate::config::CliOverrides;
use crate::logging;
use commands::CommandContext;

/// `itrack` - Minimal issue tracker.
#[derive(Parser, Debug)]
#[command(name = "itrack")]
#[command(
    author,
    version,
    about = "Minimal issue tracker (JSON key-value storage)",
    long_about = None,
    after_help = "Issues live in .itrack/<storage-key>.json; a fresh workspace starts with three sample issues."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Workspace directory (default: nearest .itrack/ upwards, or $ITRACK_DIR)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Slot key holding the issue collection
    #[arg(long, global = true, value_name = "KEY")]
    pub storage_key: Option<String>,

    /// Start from an empty collection instead of the sample issues
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an itrack workspace
    Init(InitArgs),

    /// Create a new issue
    Create(CreateArgs),

    /// List issues
    #[command(alias = "ls")]
    List,

    /// Show issue details
    Show(ShowArgs),

    /// Change the status and/or priority of an issue
    Update(UpdateArgs),

    /// Delete an issue
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Check the workspace and stored issues
    Doctor,

    /// Print the JSON Schema of a stored issue record
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Overwrite the stored issues with the initial collection
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Issue title
    pub title: String,

    /// Issue description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Status (todo, in-progress, done)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Issue ID (a unique prefix is enough)
    pub id: String,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Issue ID (exact)
    pub id: String,

    /// New status (todo, in-progress, done)
    #[arg(short, long)]
    pub status: Option<String>,

    /// New priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct DeleteArgs {
    /// Issue ID (exact)
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    #[value(name = "powershell")]
    #[value(alias = "pwsh")]
    /// `PowerShell`
    PowerShell,
    /// Elvish
    Elvish,
}

impl Cli {
    /// Per-invocation settings shared by every command.
    #[must_use]
    pub fn context(&self) -> CommandContext {
        CommandContext {
            json: self.json,
            dir: self.dir.clone(),
            overrides: CliOverrides {
                storage_key: self.storage_key.clone(),
                seed: self.no_seed.then_some(false),
            },
        }
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let ctx = cli.context();
    let Some(command) = cli.command else {
        println!("itrack - minimal issue tracker. Use --help for usage.");
        return Ok(());
    };
    info!(command = command.name(), json = ctx.json, "running command");

    match command {
        Commands::Init(args) => commands::init::execute(&args, &ctx)?,
        Commands::Create(args) => commands::create::execute(&args, &ctx)?,
        Commands::List => commands::list::execute(&ctx)?,
        Commands::Show(args) => commands::show::execute(&args, &ctx)?,
        Commands::Update(args) => commands::update::execute(&args, &ctx)?,
        Commands::Delete(args) => commands::delete::execute(&args, &ctx)?,
        Commands::Doctor => commands::doctor::execute(&ctx)?,
        Commands::Schema => commands::schema::execute()?,
        Commands::Completions(args) => commands::completions::execute(&args)?,
        Commands::Version => commands::version::execute(&ctx)?,
    }

    Ok(())
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Create(_) => "create",
            Self::List => "list",
            Self::Show(_) => "show",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Doctor => "doctor",
            Self::Schema => "schema",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}
