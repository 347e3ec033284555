// src/core/version_map.rs

use crate::models::VersionMapping;
use thiserror::Error;

/// The Photoshop releases the generator knows about, in prompt order.
pub const BUILTIN_VERSIONS: &[(&str, VersionMapping)] = &[
    (
        "CC 2014",
        VersionMapping {
            platform_version_id: "15.0",
            runtime_version_id: "5.0",
            runtime_download_base_url: "http://raw.githubusercontent.com/Adobe-CEP/CEP-Resources/master/CEP_5.x",
        },
    ),
    (
        "CC 2015",
        VersionMapping {
            platform_version_id: "16.0",
            runtime_version_id: "6.0",
            runtime_download_base_url: "http://raw.githubusercontent.com/Adobe-CEP/CEP-Resources/master/CEP_6.x",
        },
    ),
    (
        "CC 2015.1",
        VersionMapping {
            platform_version_id: "17.0.2",
            runtime_version_id: "7.0",
            runtime_download_base_url: "http://raw.githubusercontent.com/Adobe-CEP/CEP-Resources/master/CEP_7.x",
        },
    ),
    (
        "CC 2015.5",
        VersionMapping {
            platform_version_id: "17.0.2",
            runtime_version_id: "7.0",
            runtime_download_base_url: "http://raw.githubusercontent.com/Adobe-CEP/CEP-Resources/master/CEP_7.x",
        },
    ),
    (
        "CC 2017",
        VersionMapping {
            platform_version_id: "18.0",
            runtime_version_id: "7.0",
            runtime_download_base_url: "http://raw.githubusercontent.com/Adobe-CEP/CEP-Resources/master/CEP_7.x",
        },
    ),
    (
        "CC 2018",
        VersionMapping {
            platform_version_id: "19.0",
            runtime_version_id: "8.0",
            runtime_download_base_url: "http://raw.githubusercontent.com/Adobe-CEP/CEP-Resources/master/CEP_8.x",
        },
    ),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionMapError {
    /// Labels only come from the prompt choices, so this indicates a bug
    /// (or a hand-typed `--ps-version`). It aborts the run.
    #[error("Unknown Photoshop version '{label}'. Known versions: {known}.")]
    UnknownLabel { label: String, known: String },
}

/// A read-only table from version label to platform/runtime identifiers.
///
/// Components receive the map explicitly, so tests can substitute a smaller one.
#[derive(Debug, Clone, Copy)]
pub struct VersionMap {
    entries: &'static [(&'static str, VersionMapping)],
}

impl Default for VersionMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VersionMap {
    /// The table compiled into the tool.
    pub const fn builtin() -> Self {
        Self {
            entries: BUILTIN_VERSIONS,
        }
    }

    pub const fn new(entries: &'static [(&'static str, VersionMapping)]) -> Self {
        Self { entries }
    }

    /// All labels, in the order they are offered to the user.
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(label, _)| *label).collect()
    }

    /// Exact-match lookup. There is no fallback for unknown labels.
    pub fn lookup(&self, label: &str) -> Result<&VersionMapping, VersionMapError> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, mapping)| mapping)
            .ok_or_else(|| VersionMapError::UnknownLabel {
                label: label.to_string(),
                known: self.labels().join(", "),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, VersionMapping)> {
        self.entries.iter()
    }
}
