//! # Deploy Task
//!
//! Installs an assembled extension (`dist/`) into its CEP deployment directory.
//!
//! The previous deployment, if any, is moved aside with a single `rename` to
//! `<target>.<epoch millis>` before anything is written. The new build is then
//! copied into place. On success the backup is deleted; on failure the partial
//! copy is removed and the backup renamed back, so the target is always either
//! the old tree or the new one.
//!
//! `rename` is the only atomicity primitive: the backup must live on the same
//! volume as the target, which is guaranteed by placing it in the same parent.
//! Concurrent deploys to the same target are not supported.

use crate::core::{
    digest,
    fs_ops::{self, CopyError, FileCopier},
};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Nothing to deploy. Run the \"build\" task first ('{}' is missing or empty).", .0.display())]
    NothingToDeploy(PathBuf),
    #[error("Deployment target '{}' exists but is not a directory.", .0.display())]
    TargetNotADirectory(PathBuf),
    #[error("Could not move the previous deployment '{}' aside to '{}': {source}", .target.display(), .backup.display())]
    Backup {
        target: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not prepare the deployment directory '{}': {source}", .path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Deployment failed: {0}")]
    Copy(#[source] CopyError),
    #[error("Deployment failed verification: '{}' does not match the build output.", .0.display())]
    VerificationFailed(PathBuf),
    #[error("Could not verify the deployment: {0}")]
    Digest(#[source] io::Error),
    #[error(
        "Deployment failed ({cause}) and the previous deployment could not be restored: {restore}. It is still available at '{}'.",
        .backup.display()
    )]
    RestoreFailed {
        #[source]
        cause: Box<DeployError>,
        restore: io::Error,
        backup: PathBuf,
    },
}

/// Options for a single deploy run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeployOptions {
    /// Compare content digests of the build output and the deployed tree
    /// after copying. A mismatch is treated like a failed copy.
    pub verify: bool,
}

/// What a successful deploy did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub target: PathBuf,
    pub files_copied: usize,
    /// Set when a previous deployment was replaced.
    pub replaced_previous: bool,
    /// A backup that could not be deleted after success (best-effort cleanup).
    pub leftover_backup: Option<PathBuf>,
}

/// Deploys `build_dir` into `target` using the regular filesystem copy.
pub fn deploy(
    build_dir: &Path,
    target: &Path,
    options: DeployOptions,
) -> Result<DeployReport, DeployError> {
    deploy_with_copier(build_dir, target, options, &mut fs_ops::copy_file)
}

/// Same as [`deploy`], with the per-file copy function supplied by the caller.
pub fn deploy_with_copier(
    build_dir: &Path,
    target: &Path,
    options: DeployOptions,
    copier: &mut FileCopier<'_>,
) -> Result<DeployReport, DeployError> {
    // --- 0. Preconditions: no mutation happens before these pass ---
    if !fs_ops::dir_exists(build_dir) || fs_ops::dir_is_empty(build_dir) {
        return Err(DeployError::NothingToDeploy(build_dir.to_path_buf()));
    }
    if target.exists() && !target.is_dir() {
        return Err(DeployError::TargetNotADirectory(target.to_path_buf()));
    }

    // --- 1. Move the previous deployment aside ---
    let backup = if fs_ops::dir_exists(target) {
        let backup = backup_path(target, now_millis());
        fs::rename(target, &backup).map_err(|e| DeployError::Backup {
            target: target.to_path_buf(),
            backup: backup.clone(),
            source: e,
        })?;
        log::info!("Previous deployment moved to '{}'", backup.display());
        Some(backup)
    } else {
        None
    };

    // --- 2. Copy the new build into place ---
    match install(build_dir, target, options, copier) {
        Ok(files_copied) => {
            // --- 3a. Drop the backup ---
            let replaced_previous = backup.is_some();
            let leftover_backup = backup.and_then(|b| match fs::remove_dir_all(&b) {
                Ok(()) => None,
                Err(e) => {
                    log::warn!("Could not delete backup '{}': {}", b.display(), e);
                    Some(b)
                }
            });
            log::info!(
                "Deployed {} file(s) to '{}'",
                files_copied,
                target.display()
            );
            Ok(DeployReport {
                target: target.to_path_buf(),
                files_copied,
                replaced_previous,
                leftover_backup,
            })
        }
        Err(cause) => {
            // --- 3b. Roll back ---
            match backup {
                Some(backup) => rollback(target, backup, cause),
                None => {
                    // No previous deployment to return to. A partially
                    // written target is left in place.
                    if target.exists() {
                        log::warn!(
                            "Deployment failed with no previous deployment to restore; '{}' may be incomplete.",
                            target.display()
                        );
                    }
                    Err(cause)
                }
            }
        }
    }
}

/// Copies (and optionally verifies) the build output into `target`.
fn install(
    build_dir: &Path,
    target: &Path,
    options: DeployOptions,
    copier: &mut FileCopier<'_>,
) -> Result<usize, DeployError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| DeployError::Prepare {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let files_copied = fs_ops::copy_tree(build_dir, target, copier).map_err(DeployError::Copy)?;

    if options.verify {
        let expected = digest::tree_digest(build_dir).map_err(DeployError::Digest)?;
        let actual = digest::tree_digest(target).map_err(DeployError::Digest)?;
        if expected != actual {
            return Err(DeployError::VerificationFailed(target.to_path_buf()));
        }
        log::debug!("Deployment verified, digest {}", actual);
    }

    Ok(files_copied)
}

/// Restores `backup` into `target` after a failed copy and returns the
/// original failure (or a combined error if restoring fails too).
fn rollback(target: &Path, backup: PathBuf, cause: DeployError) -> Result<DeployReport, DeployError> {
    log::warn!(
        "Deployment failed, restoring previous deployment from '{}'",
        backup.display()
    );

    let restore = || -> io::Result<()> {
        if target.exists() {
            fs::remove_dir_all(target)?;
        }
        fs::rename(&backup, target)
    };

    match restore() {
        Ok(()) => {
            log::info!("Previous deployment restored at '{}'", target.display());
            Err(cause)
        }
        Err(restore_error) => {
            log::error!(
                "Unrecoverable: could not restore '{}' from '{}': {}",
                target.display(),
                backup.display(),
                restore_error
            );
            Err(DeployError::RestoreFailed {
                cause: Box::new(cause),
                restore: restore_error,
                backup,
            })
        }
    }
}

/// `<target>.<millis>`, next to the target so the rename stays on one volume.
pub fn backup_path(target: &Path, millis: u128) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}", millis));
    target.with_file_name(name)
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
