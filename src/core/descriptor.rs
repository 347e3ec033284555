// src/core/descriptor.rs

use crate::{
    constants::METADATA_FILENAME,
    core::{
        validators::{self, ValidationError},
        version_map::{VersionMap, VersionMapError},
    },
    models::{Answers, ExtensionDescriptor},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Invalid answer for {field}: {source}")]
    InvalidAnswer {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    #[error(transparent)]
    UnknownVersion(#[from] VersionMapError),
    #[error("Could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not a valid extension descriptor: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Values that come from the environment rather than from the user's answers.
#[derive(Debug, Clone)]
pub struct DescriptorSettings {
    /// The CEP extensions directory; the extension is deployed into `<dir>/<id>`.
    pub extensions_dir: PathBuf,
    pub debug_port: u16,
}

/// Builds the descriptor for a new extension from the collected answers.
///
/// Pure: it touches neither the filesystem nor the prompts. Answers are
/// re-validated so the function is safe to call with flag values too.
pub fn build_descriptor(
    answers: &Answers,
    version_map: &VersionMap,
    settings: &DescriptorSettings,
) -> Result<ExtensionDescriptor, DescriptorError> {
    validators::validate_identifier(Some(answers.extension_id.as_str())).map_err(|source| {
        DescriptorError::InvalidAnswer {
            field: "extension id",
            source,
        }
    })?;
    validators::validate_non_empty(Some(answers.extension_name.as_str())).map_err(|source| {
        DescriptorError::InvalidAnswer {
            field: "extension name",
            source,
        }
    })?;
    validators::validate_exactly_one_selected(&answers.platform_version_names).map_err(
        |source| DescriptorError::InvalidAnswer {
            field: "Photoshop version",
            source,
        },
    )?;

    let version_name = answers
        .platform_version_names
        .first()
        .ok_or(DescriptorError::InvalidAnswer {
            field: "Photoshop version",
            source: ValidationError::NothingSelected,
        })?;
    let mapping = version_map.lookup(version_name)?;

    Ok(ExtensionDescriptor {
        id: answers.extension_id.clone(),
        name: answers.extension_name.trim().to_string(),
        platform_version_name: version_name.clone(),
        platform_version_id: mapping.platform_version_id.to_string(),
        runtime_version_id: mapping.runtime_version_id.to_string(),
        runtime_download_base_url: mapping.runtime_download_base_url.to_string(),
        deployment_dir: settings.extensions_dir.join(&answers.extension_id),
        debug_port: settings.debug_port,
    })
}

/// The template rendering context: `{ "extension": <descriptor> }`.
pub fn template_context(descriptor: &ExtensionDescriptor) -> serde_json::Value {
    serde_json::json!({ "extension": descriptor })
}

pub fn metadata_path(project_root: &Path) -> PathBuf {
    project_root.join(METADATA_FILENAME)
}

/// Writes `ps-extension.json` at the project root.
pub fn save_descriptor(
    project_root: &Path,
    descriptor: &ExtensionDescriptor,
) -> Result<PathBuf, DescriptorError> {
    let path = metadata_path(project_root);
    let mut json = serde_json::to_string_pretty(descriptor).map_err(|e| DescriptorError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    json.push('\n');
    fs::write(&path, json).map_err(|e| DescriptorError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Descriptor written to '{}'", path.display());
    Ok(path)
}

/// Reads `ps-extension.json` from the project root.
pub fn load_descriptor(project_root: &Path) -> Result<ExtensionDescriptor, DescriptorError> {
    let path = metadata_path(project_root);
    let content = fs::read_to_string(&path).map_err(|e| DescriptorError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| DescriptorError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn answers(id: &str, name: &str, versions: &[&str]) -> Answers {
        Answers {
            extension_id: id.to_string(),
            extension_name: name.to_string(),
            platform_version_names: versions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn settings() -> DescriptorSettings {
        DescriptorSettings {
            extensions_dir: PathBuf::from("/cep/extensions"),
            debug_port: 8088,
        }
    }

    #[test]
    fn test_build_descriptor_maps_version() {
        let descriptor = build_descriptor(
            &answers("com.acme.panel", "  Acme Panel ", &["CC 2017"]),
            &VersionMap::builtin(),
            &settings(),
        )
        .unwrap();

        assert_eq!(descriptor.id, "com.acme.panel");
        assert_eq!(descriptor.name, "Acme Panel");
        assert_eq!(descriptor.platform_version_name, "CC 2017");
        assert_eq!(descriptor.platform_version_id, "18.0");
        assert_eq!(descriptor.runtime_version_id, "7.0");
        assert!(descriptor.runtime_download_base_url.ends_with("/CEP_7.x"));
        assert_eq!(
            descriptor.deployment_dir,
            PathBuf::from("/cep/extensions/com.acme.panel")
        );
        assert_eq!(descriptor.debug_port, 8088);
    }

    #[test]
    fn test_build_descriptor_rejects_bad_answers() {
        let map = VersionMap::builtin();
        let result = build_descriptor(&answers("-bad", "Name", &["CC 2015"]), &map, &settings());
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidAnswer { field: "extension id", .. })
        ));

        let result = build_descriptor(&answers("ok", "  ", &["CC 2015"]), &map, &settings());
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidAnswer { field: "extension name", .. })
        ));

        let result = build_descriptor(
            &answers("ok", "Name", &["CC 2015", "CC 2018"]),
            &map,
            &settings(),
        );
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidAnswer {
                source: ValidationError::TooManySelected,
                ..
            })
        ));
    }

    #[test]
    fn test_build_descriptor_unknown_version_is_fatal() {
        let result = build_descriptor(
            &answers("ok", "Name", &["CC 2099"]),
            &VersionMap::builtin(),
            &settings(),
        );
        assert!(matches!(result, Err(DescriptorError::UnknownVersion(_))));
    }

    #[test]
    fn test_descriptor_json_field_names() {
        let descriptor = build_descriptor(
            &answers("panel", "Panel", &["CC 2018"]),
            &VersionMap::builtin(),
            &settings(),
        )
        .unwrap();
        let value = serde_json::to_value(&descriptor).unwrap();

        for key in [
            "id",
            "name",
            "platformVersionName",
            "platformVersionId",
            "runtimeVersionId",
            "runtimeDownloadBaseURL",
            "deploymentDir",
            "debugPort",
        ] {
            assert!(value.get(key).is_some(), "missing key '{}'", key);
        }
        assert_eq!(template_context(&descriptor)["extension"]["debugPort"], 8088);
    }

    #[test]
    fn test_save_and_load_descriptor() {
        let dir = TempDir::new().unwrap();
        let descriptor = build_descriptor(
            &answers("panel", "Panel", &["CC 2014"]),
            &VersionMap::builtin(),
            &settings(),
        )
        .unwrap();

        let path = save_descriptor(dir.path(), &descriptor).unwrap();
        assert_eq!(path, dir.path().join(METADATA_FILENAME));
        assert_eq!(load_descriptor(dir.path()).unwrap(), descriptor);
    }

    #[test]
    fn test_load_descriptor_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_descriptor(dir.path()),
            Err(DescriptorError::Read { .. })
        ));

        fs::write(dir.path().join(METADATA_FILENAME), "{ \"id\": 1 }").unwrap();
        assert!(matches!(
            load_descriptor(dir.path()),
            Err(DescriptorError::Json { .. })
        ));
    }
}
