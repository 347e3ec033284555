//! # Config Loader
//!
//! Loads the optional user-level `config.toml`. A missing file yields the
//! defaults; a present but malformed file is an error rather than being ignored.
use crate::{core::paths, models::ToolConfig};
use std::{fs, io::ErrorKind, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Path error: {0}")]
    Path(#[from] paths::PathError),
    #[error("Could not read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Loads the config from the default location in the user's config directory.
pub fn load_tool_config() -> Result<ToolConfig, ConfigError> {
    let path = paths::get_tool_config_path()?;
    load_tool_config_from(&path)
}

/// Loads the config from an explicit path. A missing file is not an error.
pub fn load_tool_config_from(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No config file at '{}', using defaults.", path.display());
            return Ok(ToolConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    let config: ToolConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    validate(&config)?;

    log::debug!("Loaded config from '{}': {:?}", path.display(), config);
    Ok(config)
}

fn validate(config: &ToolConfig) -> Result<(), ConfigError> {
    if config.install_command.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "install_command",
            message: "must not be empty".to_string(),
        });
    }
    if config.download_timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "download_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if let Some(bad) = config
        .install_subdirs
        .iter()
        .find(|d| Path::new(d).is_absolute() || d.split(['/', '\\']).any(|c| c == ".."))
    {
        return Err(ConfigError::InvalidValue {
            key: "install_subdirs",
            message: format!("'{}' must be a path inside the project", bad),
        });
    }
    Ok(())
}
