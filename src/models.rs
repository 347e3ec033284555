// src/models.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DEBUG_PORT, DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_INSTALL_COMMAND,
    DEFAULT_UI_BUILD_COMMAND, HOST_DIR, UI_DIR,
};

// --- EXTENSION METADATA (persisted as `ps-extension.json`) ---

/// Describes one generated extension project.
///
/// Built once by the `new` flow and written next to the project sources. The
/// build and deploy tasks read it back; nothing mutates it afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDescriptor {
    pub id: String,
    pub name: String,
    pub platform_version_name: String,
    pub platform_version_id: String,
    pub runtime_version_id: String,
    #[serde(rename = "runtimeDownloadBaseURL")]
    pub runtime_download_base_url: String,
    pub deployment_dir: PathBuf,
    pub debug_port: u16,
}

/// Platform and runtime identifiers for one Photoshop release.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VersionMapping {
    pub platform_version_id: &'static str,
    pub runtime_version_id: &'static str,
    #[serde(rename = "runtimeDownloadBaseURL")]
    pub runtime_download_base_url: &'static str,
}

/// Raw answers gathered from the prompts (or the equivalent flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub extension_id: String,
    pub extension_name: String,
    /// Every label ticked in the version checkbox. Exactly one is valid.
    pub platform_version_names: Vec<String>,
}

// --- `config.toml` MODEL ---

/// User-level tool settings. Every field has a default, so an absent or
/// partial file is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub install_command: String,
    pub install_subdirs: Vec<String>,
    pub ui_build_command: String,
    pub extensions_dir: Option<String>,
    pub debug_port: u16,
    pub download_timeout_secs: u64,
    pub template_dir: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
            install_subdirs: vec![HOST_DIR.to_string(), UI_DIR.to_string()],
            ui_build_command: DEFAULT_UI_BUILD_COMMAND.to_string(),
            extensions_dir: None,
            debug_port: DEFAULT_DEBUG_PORT,
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            template_dir: None,
        }
    }
}
