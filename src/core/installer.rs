// src/core/installer.rs

use crate::system::executor::{self, ExecutionError};
use colored::Colorize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Dependency installation failed in '{}': {source}", .dir.display())]
    Failed {
        dir: PathBuf,
        #[source]
        source: ExecutionError,
    },
}

/// Runs the package manager's install command in the project root and then in
/// each subdirectory, strictly in order.
///
/// Each invocation blocks until it exits, so package managers never share a
/// lockfile or interleave output. The first failure aborts the remaining runs.
///
/// Returns the directories that were installed.
pub fn install_dependencies(
    project_root: &Path,
    install_command: &str,
    subdirs: &[String],
) -> Result<Vec<PathBuf>, InstallError> {
    let dirs: Vec<PathBuf> = std::iter::once(project_root.to_path_buf())
        .chain(subdirs.iter().map(|sub| project_root.join(sub)))
        .collect();

    for dir in &dirs {
        println!(
            "  {} {} {}",
            "install".cyan(),
            install_command.dimmed(),
            format!("({})", dir.display()).dimmed()
        );
        executor::execute_command(install_command, dir).map_err(|source| {
            InstallError::Failed {
                dir: dir.clone(),
                source,
            }
        })?;
        log::info!("Dependencies installed in '{}'", dir.display());
    }

    Ok(dirs)
}
