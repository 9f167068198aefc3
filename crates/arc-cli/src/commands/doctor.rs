//! Doctor command
//!
//! Diagnose installation and configuration.

use crate::context::AppContext;
use anyhow::Result;
use arc_integration::verification::{
    verify_default_settings, verify_git, verify_protected_paths, verify_tool,
    verify_user_settings, VerificationResult,
};
use clap::Args;

/// Arguments for the doctor command
#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Show suggestions for passing checks too
    #[arg(short = 'a', long)]
    pub all: bool,
}

/// Execute the doctor command
pub fn execute(args: DoctorArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let settings = &ctx.config.settings;
    let checks = vec![
        verify_tool(&ctx.config.tool.binary),
        verify_git(),
        verify_user_settings(&settings.user_file),
        verify_default_settings(settings.default_file.as_deref()),
        verify_protected_paths(&settings.user_file, &settings.protected_key),
    ];

    println!("{}", "arc-helper doctor".bold().underline());
    println!();

    for check in &checks {
        print_check(check, args.all);
    }

    let failed = checks.iter().filter(|c| !c.passed).count();
    println!();
    if failed == 0 {
        println!("{} All checks passed", "✓".green());
    } else {
        println!("{} {} check(s) failed", "✗".red(), failed);
    }

    Ok(())
}

fn print_check(check: &VerificationResult, show_all: bool) {
    use colored::Colorize;

    let icon = if check.passed {
        "✓".green()
    } else {
        "✗".red()
    };
    println!("  {} {}: {}", icon, check.name.bold(), check.message);

    if let Some(suggestion) = &check.suggestion {
        if !check.passed || show_all || check.message.starts_with('⚠') {
            println!("      {} {}", "→".dimmed(), suggestion.dimmed());
        }
    }
}
