//! Update-settings command
//!
//! Merge the distributed default settings into the user's settings file.

use crate::context::AppContext;
use anyhow::{Context, Result};
use arc_core::settings::render_report;
use arc_core::types::SystemClock;
use arc_storage::{SettingsFile, SettingsUpdate, SettingsUpdater};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the update-settings command
#[derive(Debug, Args)]
pub struct UpdateSettingsArgs {
    /// Settings file to update (defaults to [settings].user_file)
    #[arg(long)]
    pub user_file: Option<PathBuf>,

    /// Default settings to merge in (defaults to [settings].default_file)
    #[arg(long)]
    pub default_file: Option<PathBuf>,

    /// Don't backup the existing settings file
    #[arg(long)]
    pub no_backup: bool,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the update-settings command
pub fn execute(args: UpdateSettingsArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let user_file = args
        .user_file
        .unwrap_or_else(|| ctx.config.settings.user_file.clone());
    let default_file = args
        .default_file
        .or_else(|| ctx.config.settings.default_file.clone())
        .context("No default settings file; pass --default-file or set [settings].default_file")?;

    let update = apply(
        ctx,
        &user_file,
        &default_file,
        ctx.config.settings.create_backup && !args.no_backup,
        args.dry_run,
    )?;

    if update.reconciliation.is_unchanged() {
        println!("{} {} is up to date", "✓".green(), user_file.display());
    } else if args.dry_run {
        println!(
            "{} Dry run - {} change(s) not written",
            "📋",
            update.reconciliation.changes.len()
        );
    }

    Ok(())
}

/// Reconcile `user_file` with `default_file` and print the change report
pub fn apply(
    ctx: &AppContext,
    user_file: &Path,
    default_file: &Path,
    create_backup: bool,
    dry_run: bool,
) -> Result<SettingsUpdate> {
    use colored::Colorize;

    let updater = SettingsUpdater::new(
        SettingsFile::new(user_file),
        SettingsFile::new(default_file),
        ctx.config.reconciler(),
    )
    .with_backup(create_backup)
    .with_dry_run(dry_run);

    let update = updater.update(&SystemClock)?;

    if !update.reconciliation.is_unchanged() {
        eprintln!(
            "{} Updating {} from {}",
            "⟳".cyan(),
            user_file.display(),
            default_file.display()
        );
        eprint!(
            "{}",
            render_report(&user_file.display().to_string(), &update.reconciliation.changes)
        );
    }
    if let Some(backup) = &update.backup {
        eprintln!("{} Backed up previous settings to {}", "✓".green(), backup.display());
    }

    Ok(update)
}
