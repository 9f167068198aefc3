//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod doctor;
pub mod resolve;
pub mod rewrite;
pub mod run;
pub mod update_settings;

use crate::context::AppContext;
use clap::{Parser, Subcommand};

/// arc-helper - reviewer name resolution and settings upkeep for arc
#[derive(Debug, Parser)]
#[command(name = "arc-helper")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Never prompt; ambiguous names become errors
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Read the user roster from a JSON file instead of querying the server
    #[arg(long, global = true, env = "ARC_HELPER_USERS_FILE")]
    pub users_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rewrite arguments and run the review tool
    Run(run::RunArgs),

    /// Resolve name fragments to usernames
    Resolve(resolve::ResolveArgs),

    /// Print the rewritten arguments without running anything
    Rewrite(rewrite::RewriteArgs),

    /// Merge default settings into your settings file
    UpdateSettings(update_settings::UpdateSettingsArgs),

    /// Diagnose installation and configuration
    Doctor(doctor::DoctorArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = AppContext::load(cli.config.as_deref(), cli.users_file, cli.non_interactive)?;

    // Dispatch to command handler
    match cli.command {
        Commands::Run(args) => run::execute(args, &ctx),
        Commands::Resolve(args) => resolve::execute(args, &ctx),
        Commands::Rewrite(args) => rewrite::execute(args, &ctx),
        Commands::UpdateSettings(args) => update_settings::execute(args, &ctx),
        Commands::Doctor(args) => doctor::execute(args, &ctx),
        Commands::Config(cmd) => config::execute(cmd, &ctx),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_run_accepts_tool_flags() {
        let cli = Cli::try_parse_from([
            "arc-helper",
            "run",
            "--",
            "diff",
            "--rr=ben",
            "--verbatim",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => assert_eq!(args.args, vec!["diff", "--rr=ben", "--verbatim"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
