//! Rewrite command
//!
//! Show the arguments `run` would pass to the review tool.

use crate::context::AppContext;
use anyhow::Result;
use arc_core::args::add_onto_for_land;
use arc_integration::GitBranchQuery;
use clap::Args;

/// Arguments for the rewrite command
#[derive(Debug, Args)]
pub struct RewriteArgs {
    /// Print the result as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Also add `--onto` to `land`
    #[arg(long)]
    pub land: bool,

    /// Arguments for the review tool
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Execute the rewrite command
pub fn execute(args: RewriteArgs, ctx: &AppContext) -> Result<()> {
    let resolver = ctx.resolver()?;
    let mut rewritten = ctx.config.rewriter().rewrite(&args.args, &resolver)?;
    if args.land {
        rewritten = add_onto_for_land(&rewritten, &GitBranchQuery::new())?;
    }

    if args.json {
        println!("{}", serde_json::to_string(&rewritten)?);
    } else {
        println!("{}", rewritten.join(" "));
    }
    Ok(())
}
