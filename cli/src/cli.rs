//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags, PathFlags};
use crate::commands;

/// Health checks and cleanup for MCP server registries
#[derive(Parser)]
#[command(
    name = "mcpdoc",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Registry document to use
    #[arg(long, global = true, env = "MCPDOC_REGISTRY", value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Where to write the health report
    #[arg(long, global = true, env = "MCPDOC_REPORT", value_name = "PATH")]
    pub report: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify every registered server and write a health report
    Check(commands::check::CheckArgs),

    /// Remove entries whose script no longer exists
    Clean(commands::clean::CleanArgs),

    /// List registered servers by category
    List,

    /// Manage settings
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            yes,
            registry,
            report,
            command,
        } = self;
        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
            paths: PathFlags { registry, report },
        };
        let app = AppContext::new(flags)?;

        match command {
            Command::Check(args) => commands::check::run(&app, &args).await,
            Command::Clean(args) => commands::clean::run(&app, &args),
            Command::List => commands::list::run(&app),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
