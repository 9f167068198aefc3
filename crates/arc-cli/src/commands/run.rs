//! Run command
//!
//! Bring settings up to date, rewrite reviewer and land flags, then hand
//! off to the review tool.

use crate::context::AppContext;
use anyhow::{Context, Result};
use arc_core::args::add_onto_for_land;
use arc_integration::GitBranchQuery;
use clap::Args;
use std::process::Command;

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Print the final command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the automatic settings update
    #[arg(long)]
    pub no_settings_update: bool,

    /// Arguments for the review tool
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Execute the run command
pub fn execute(args: RunArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let settings = &ctx.config.settings;
    if let Some(default_file) = settings.default_file.as_deref() {
        if !args.no_settings_update {
            super::update_settings::apply(
                ctx,
                &settings.user_file,
                default_file,
                settings.create_backup,
                args.dry_run,
            )?;
        }
    }

    let resolver = ctx.resolver()?;
    let rewritten = ctx.config.rewriter().rewrite(&args.args, &resolver)?;
    let final_args = add_onto_for_land(&rewritten, &GitBranchQuery::new())?;
    tracing::info!("Final arguments: {:?}", final_args);

    let binary = &ctx.config.tool.binary;
    if args.dry_run {
        println!("{} {}", binary, final_args.join(" "));
        return Ok(());
    }

    let status = Command::new(binary)
        .args(&final_args)
        .status()
        .with_context(|| format!("Failed to run {}", binary))?;

    if !status.success() {
        let code = status.code().unwrap_or(1);
        eprintln!("{} {} exited with status {}", "✗".red(), binary, code);
        std::process::exit(code);
    }

    Ok(())
}
