// src/core/builder.rs

//! # Build Tasks
//!
//! `clean` and `build` for a generated project. The build is a straight
//! sequence of steps; the first failing step aborts the rest.

use crate::{
    constants::{BUILD_TEMPLATES_DIR, DIST_DIR, HOST_DIR, UI_DIR},
    core::{
        descriptor,
        fs_ops::{self, CopyError},
        interpolator::{InterpolationError, Interpolator},
    },
    models::ExtensionDescriptor,
    system::executor::{self, ExecutionError},
};
use colored::Colorize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Build-time templates and where they land inside `dist/`.
const RENDERED_FILES: [(&str, &str); 2] = [("manifest.xml", "CSXS/manifest.xml"), (".debug", ".debug")];

/// The ExtendScript entry point, relative to `host/`.
const HOST_SCRIPT: &str = "script.jsx";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Could not clean '{}': {source}", .path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("UI build failed: {0}")]
    UiBuild(#[source] ExecutionError),
    #[error("Host script '{}' not found.", .0.display())]
    MissingHostScript(PathBuf),
    #[error("Build template '{}' not found.", .0.display())]
    MissingTemplate(PathBuf),
    #[error("Could not render '{}': {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: InterpolationError,
    },
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Copy(#[from] CopyError),
}

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub dist_dir: PathBuf,
    pub rendered: Vec<PathBuf>,
    pub files_copied: usize,
}

/// The output directories emptied by `clean`, relative to the project root.
pub fn output_dirs(project_root: &Path) -> [PathBuf; 3] {
    [
        project_root.join(DIST_DIR),
        project_root.join(UI_DIR).join(DIST_DIR),
        project_root.join(HOST_DIR).join(DIST_DIR),
    ]
}

/// Empties every output directory, keeping the directories themselves.
/// Returns the number of removed entries.
pub fn clean(project_root: &Path) -> Result<usize, BuildError> {
    let mut removed = 0;
    for dir in output_dirs(project_root) {
        removed += fs_ops::empty_dir(&dir).map_err(|source| BuildError::Clean {
            path: dir.clone(),
            source,
        })?;
        log::debug!("Cleaned '{}'", dir.display());
    }
    Ok(removed)
}

/// Builds the `ui` and `host` subprojects and assembles `dist/`.
///
/// An empty `ui_build_command` skips the UI build step.
pub fn build(
    project_root: &Path,
    descriptor: &ExtensionDescriptor,
    ui_build_command: &str,
) -> Result<BuildReport, BuildError> {
    build_ui(project_root, ui_build_command)?;
    build_host(project_root)?;
    assemble(project_root, descriptor)
}

fn build_ui(project_root: &Path, ui_build_command: &str) -> Result<(), BuildError> {
    if ui_build_command.trim().is_empty() {
        log::info!("No UI build command configured, skipping the UI build");
        return Ok(());
    }
    println!("  {} {}", "build".cyan(), format!("{} ({})", ui_build_command, UI_DIR).dimmed());
    executor::execute_command(ui_build_command, &project_root.join(UI_DIR)).map_err(BuildError::UiBuild)
}

fn build_host(project_root: &Path) -> Result<(), BuildError> {
    let host = project_root.join(HOST_DIR);
    let from = host.join("src").join(HOST_SCRIPT);
    if !from.is_file() {
        return Err(BuildError::MissingHostScript(from));
    }

    let dist = host.join(DIST_DIR);
    fs::create_dir_all(&dist).map_err(|source| BuildError::Io {
        path: dist.clone(),
        source,
    })?;
    let to = dist.join(HOST_SCRIPT);
    fs::copy(&from, &to).map_err(|source| BuildError::Io { path: to, source })?;
    println!("  {} {}", "build".cyan(), HOST_DIR.dimmed());
    Ok(())
}

fn assemble(project_root: &Path, descriptor: &ExtensionDescriptor) -> Result<BuildReport, BuildError> {
    let dist = project_root.join(DIST_DIR);
    let context = descriptor::template_context(descriptor);
    let interpolator = Interpolator::new(&context);
    let templates = project_root.join(BUILD_TEMPLATES_DIR);

    let mut rendered = Vec::with_capacity(RENDERED_FILES.len());
    for (template, output) in RENDERED_FILES {
        let from = templates.join(template);
        let source = match fs::read_to_string(&from) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(BuildError::MissingTemplate(from));
            }
            Err(source) => return Err(BuildError::Io { path: from, source }),
        };
        let content = interpolator
            .expand_string(&source)
            .map_err(|source| BuildError::Render {
                path: from.clone(),
                source,
            })?;

        let to = dist.join(output);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&to, content).map_err(|source| BuildError::Io {
            path: to.clone(),
            source,
        })?;
        rendered.push(to);
    }

    let mut files_copied = 0;
    for sub in [UI_DIR, HOST_DIR] {
        let from = project_root.join(sub).join(DIST_DIR);
        if !fs_ops::dir_exists(&from) {
            log::warn!("'{}' does not exist, nothing to assemble from {}", from.display(), sub);
            continue;
        }
        files_copied += fs_ops::copy_tree(&from, &dist.join(sub), &mut fs_ops::copy_file)?;
    }

    log::info!(
        "Assembled '{}' ({} rendered, {} copied)",
        dist.display(),
        rendered.len(),
        files_copied
    );
    Ok(BuildReport {
        dist_dir: dist,
        rendered,
        files_copied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn descriptor() -> ExtensionDescriptor {
        ExtensionDescriptor {
            id: "com.acme.panel".to_string(),
            name: "Acme <Panel>".to_string(),
            platform_version_name: "CC 2017".to_string(),
            platform_version_id: "18.0".to_string(),
            runtime_version_id: "7.0".to_string(),
            runtime_download_base_url: "http://example.test/CEP_7.x".to_string(),
            deployment_dir: PathBuf::from("/cep/extensions/com.acme.panel"),
            debug_port: 8099,
        }
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".templates")).unwrap();
        fs::write(
            root.join(".templates/manifest.xml"),
            "<Extension Id=\"<%= extension.id %>\" Version=\"<%= extension.runtimeVersionId %>\" Name=\"<%= extension.name %>\"/>",
        )
        .unwrap();
        fs::write(root.join(".templates/.debug"), "<Host Port=\"<%= extension.debugPort %>\"/>").unwrap();
        fs::create_dir_all(root.join("host/src")).unwrap();
        fs::write(root.join("host/src/script.jsx"), "alert('hi');").unwrap();
        fs::create_dir_all(root.join("ui/dist/js")).unwrap();
        fs::write(root.join("ui/dist/index.html"), "<html/>").unwrap();
        fs::write(root.join("ui/dist/js/main.js"), "main();").unwrap();
        dir
    }

    #[test]
    fn test_build_assembles_dist() {
        let dir = project();
        let root = dir.path();

        let report = build(root, &descriptor(), "").unwrap();

        assert_eq!(report.dist_dir, root.join("dist"));
        assert_eq!(
            fs::read_to_string(root.join("dist/CSXS/manifest.xml")).unwrap(),
            "<Extension Id=\"com.acme.panel\" Version=\"7.0\" Name=\"Acme &lt;Panel&gt;\"/>"
        );
        assert_eq!(
            fs::read_to_string(root.join("dist/.debug")).unwrap(),
            "<Host Port=\"8099\"/>"
        );
        assert_eq!(
            fs::read_to_string(root.join("host/dist/script.jsx")).unwrap(),
            "alert('hi');"
        );
        assert_eq!(
            fs::read_to_string(root.join("dist/host/script.jsx")).unwrap(),
            "alert('hi');"
        );
        assert_eq!(fs::read_to_string(root.join("dist/ui/js/main.js")).unwrap(), "main();");
        assert_eq!(report.files_copied, 3);
        assert_eq!(report.rendered.len(), 2);
    }

    #[test]
    fn test_missing_ui_dist_is_skipped() {
        let dir = project();
        fs::remove_dir_all(dir.path().join("ui/dist")).unwrap();

        let report = build(dir.path(), &descriptor(), "").unwrap();

        assert_eq!(report.files_copied, 1);
        assert!(!dir.path().join("dist/ui").exists());
    }

    #[test]
    fn test_missing_host_script_aborts_before_assembly() {
        let dir = project();
        fs::remove_file(dir.path().join("host/src/script.jsx")).unwrap();

        let err = build(dir.path(), &descriptor(), "").unwrap_err();

        assert!(matches!(err, BuildError::MissingHostScript(_)));
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn test_missing_build_template() {
        let dir = project();
        fs::remove_file(dir.path().join(".templates/.debug")).unwrap();
        let err = build(dir.path(), &descriptor(), "").unwrap_err();
        assert!(matches!(err, BuildError::MissingTemplate(ref p) if p.ends_with(".debug")));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_ui_build_aborts() {
        let dir = project();
        let err = build(dir.path(), &descriptor(), "false").unwrap_err();
        assert!(matches!(err, BuildError::UiBuild(ExecutionError::NonZeroExitStatus { .. })));
        assert!(!dir.path().join("host/dist").exists());
    }

    #[test]
    fn test_clean_empties_output_dirs() {
        let dir = project();
        build(dir.path(), &descriptor(), "").unwrap();

        let removed = clean(dir.path()).unwrap();

        assert!(removed > 0);
        for out in output_dirs(dir.path()) {
            assert!(out.is_dir());
            assert!(fs_ops::dir_is_empty(&out));
        }
        // Sources are untouched.
        assert!(dir.path().join("host/src/script.jsx").is_file());
        assert_eq!(clean(dir.path()).unwrap(), 0);
    }
}
