//! File system storage for settings files

use arc_core::error::{ArcHelperError, Result};
use arc_core::settings::{ConfigReconciler, Reconciliation};
use arc_core::types::Clock;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A JSON settings file on disk
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// Create a handle for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the file; `None` when it does not exist
    pub fn load(&self) -> Result<Option<Value>> {
        let file = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Settings file {:?} not found", self.path);
                return Ok(None);
            }
            Err(e) => return Err(ArcHelperError::Io(e)),
        };

        let reader = BufReader::new(file);
        let value: Value = serde_json::from_reader(reader).map_err(|e| {
            ArcHelperError::Serde(e).with_context(format!("Failed to parse {}", self.path.display()))
        })?;
        Ok(Some(value))
    }

    /// Write `value` as pretty JSON (write to temp, then rename).
    ///
    /// The temp file is unique per write and created owner-only, so the
    /// replaced file ends up `0600` on unix.
    pub fn save(&self, value: &Value) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent.to_path_buf()
            }
            None => PathBuf::from("."),
        };
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "settings".to_string());

        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{}.", name))
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| {
                ArcHelperError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create temp file: {}", e),
                ))
            })?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.persist(&self.path).map_err(|e| {
            ArcHelperError::Io(std::io::Error::new(
                e.error.kind(),
                format!("Failed to rename temp file: {}", e.error),
            ))
        })?;

        debug!("Saved settings to {:?}", self.path);
        Ok(())
    }

    /// Path a backup taken at `clock.now()` would use
    pub fn backup_path(&self, clock: &dyn Clock) -> PathBuf {
        PathBuf::from(format!(
            "{}.backup-{}",
            self.path.display(),
            clock.now().format("%Y%m%d-%H%M%S")
        ))
    }

    /// Copy the current file to an owner-only, timestamped backup.
    ///
    /// Never overwrites: an existing backup target is
    /// [`ArcHelperError::AlreadyExists`].
    pub fn backup(&self, clock: &dyn Clock) -> Result<PathBuf> {
        let backup_path = self.backup_path(clock);
        let mut source = fs::File::open(&self.path)?;
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut target = options
            .open(&backup_path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    ArcHelperError::AlreadyExists(backup_path.clone())
                } else {
                    ArcHelperError::Io(e)
                }
            })?;
        std::io::copy(&mut source, &mut target)?;
        target.flush()?;

        info!("Backed up {:?} to {:?}", self.path, backup_path);
        Ok(backup_path)
    }
}

/// Result of updating the user's settings file
#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    /// Reconciliation outcome
    pub reconciliation: Reconciliation,
    /// Backup taken before writing, if any
    pub backup: Option<PathBuf>,
    /// Whether the user file was rewritten
    pub written: bool,
}

/// Applies distributed default settings to the user's settings file
pub struct SettingsUpdater {
    user: SettingsFile,
    defaults: SettingsFile,
    reconciler: ConfigReconciler,
    create_backup: bool,
    dry_run: bool,
}

impl SettingsUpdater {
    /// Create an updater
    pub fn new(user: SettingsFile, defaults: SettingsFile, reconciler: ConfigReconciler) -> Self {
        Self {
            user,
            defaults,
            reconciler,
            create_backup: true,
            dry_run: false,
        }
    }

    /// Enable or disable the pre-write backup
    pub fn with_backup(mut self, create_backup: bool) -> Self {
        self.create_backup = create_backup;
        self
    }

    /// Compute changes without writing anything
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The user settings file
    pub fn user_file(&self) -> &SettingsFile {
        &self.user
    }

    /// Reconcile and, when something changed, back up and rewrite the user file
    pub fn update(&self, clock: &dyn Clock) -> Result<SettingsUpdate> {
        let defaults = self.defaults.load()?.ok_or_else(|| {
            ArcHelperError::Config(format!(
                "default settings file {} does not exist",
                self.defaults.path().display()
            ))
        })?;
        let local = self.user.load()?;
        let existed = local.is_some();

        let reconciliation = self
            .reconciler
            .reconcile(local, &defaults)
            .map_err(|e| e.with_context(format!("Failed to update {}", self.user.path().display())))?;

        if reconciliation.is_unchanged() || self.dry_run {
            return Ok(SettingsUpdate {
                reconciliation,
                backup: None,
                written: false,
            });
        }

        let backup = if self.create_backup && existed {
            Some(self.user.backup(clock)?)
        } else {
            None
        };
        self.user.save(&reconciliation.merged)?;
        info!(
            "Applied {} change(s) to {:?}",
            reconciliation.changes.len(),
            self.user.path()
        );

        Ok(SettingsUpdate {
            reconciliation,
            backup,
            written: true,
        })
    }
}
