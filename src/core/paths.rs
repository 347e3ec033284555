// src/core/paths.rs

use crate::constants::{CONFIG_DIR_NAME, TOOL_CONFIG_FILENAME};
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref CEPGEN_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not find the user data directory to locate the CEP extensions folder.")]
    DataDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to expand path '{template}': {message}")]
    Expansion { template: String, message: String },
}

/// Returns the path to the cepgen configuration directory (`~/.config/cepgen`).
/// Creates it if it doesn't exist.
///
/// The first call computes and caches the path; later calls return the cached value.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = CEPGEN_CONFIG_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached_path_guard = Some(config_path.clone());
    Ok(config_path)
}

/// Returns the path to the optional `config.toml` file.
pub fn get_tool_config_path() -> Result<PathBuf, PathError> {
    get_config_dir().map(|dir| dir.join(TOOL_CONFIG_FILENAME))
}

/// The per-user directory Photoshop scans for unsigned CEP extensions.
///
/// `dirs::data_dir` resolves to `%APPDATA%` on Windows and
/// `~/Library/Application Support` on macOS, which is where CEP looks.
pub fn default_extensions_dir() -> Result<PathBuf, PathError> {
    dirs::data_dir()
        .map(|dir| dir.join("Adobe").join("CEP").join("extensions"))
        .ok_or(PathError::DataDirNotFound)
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
pub fn expand_path(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Resolves the extensions directory: the configured override if any, otherwise
/// the platform default.
pub fn resolve_extensions_dir(configured: Option<&str>) -> Result<PathBuf, PathError> {
    match configured {
        Some(template) => expand_path(template),
        None => default_extensions_dir(),
    }
}
