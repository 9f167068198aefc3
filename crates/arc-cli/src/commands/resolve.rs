//! Resolve command
//!
//! Print the canonical username for each name fragment.

use crate::context::AppContext;
use anyhow::Result;
use arc_core::users::ResolveNames;
use clap::Args;

/// Arguments for the resolve command
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Partial usernames or real names
    #[arg(required = true)]
    pub fragments: Vec<String>,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs, ctx: &AppContext) -> Result<()> {
    let resolver = ctx.resolver()?;
    for username in resolver.resolve(&args.fragments)? {
        println!("{}", username);
    }
    Ok(())
}
