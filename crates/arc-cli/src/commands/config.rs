//! Config command
//!
//! Inspect arc-helper configuration.

use crate::context::{default_config_path, AppContext};
use anyhow::Result;
use clap::Subcommand;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path that is read by default
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, ctx: &AppContext) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(ctx, json),
        ConfigCommand::Path => {
            println!("{}", default_config_path().display());
            Ok(())
        }
    }
}

fn show_config(ctx: &AppContext, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
    } else {
        print!("{}", toml::to_string_pretty(&ctx.config)?);
    }
    Ok(())
}
