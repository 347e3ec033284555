//! # Template Materializer
//!
//! Copies a project template into a new directory, expanding `<%= ... %>`
//! tokens in every text file against the template context.
use crate::{
    constants::BUILD_TEMPLATES_DIR,
    core::{
        builtin_template::BUILTIN_TEMPLATE,
        fs_ops,
        interpolator::{InterpolationError, Interpolator},
    },
};
use scopeguard::ScopeGuard;
use serde_json::Value;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("Target directory '{}' already exists and is not empty.", .0.display())]
    TargetNotEmpty(PathBuf),
    #[error("Template directory '{}' does not exist.", .0.display())]
    TemplateNotFound(PathBuf),
    #[error("Could not read template: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not render template file '{}': {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: InterpolationError,
    },
}

/// Where the project template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template compiled into the binary.
    Builtin,
    /// A template tree on disk.
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Include files and directories whose name starts with a dot.
    pub include_dotfiles: bool,
    /// Directories (relative to the template root) copied without expansion.
    pub verbatim_dirs: Vec<PathBuf>,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            include_dotfiles: true,
            // Rendered later by the build task, from the persisted descriptor.
            verbatim_dirs: vec![PathBuf::from(BUILD_TEMPLATES_DIR)],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub rendered: usize,
    pub copied: usize,
}

struct TemplateFile {
    relative: PathBuf,
    content: Vec<u8>,
}

/// Materializes `source` into `target`.
///
/// `target` must be absent or empty. If anything fails after this call has
/// created `target`, the directory is removed again.
pub fn materialize(
    source: &TemplateSource,
    target: &Path,
    context: &Value,
    options: &MaterializeOptions,
) -> Result<MaterializeReport, MaterializeError> {
    if target.exists() && !fs_ops::dir_is_empty(target) {
        return Err(MaterializeError::TargetNotEmpty(target.to_path_buf()));
    }

    let files = read_template(source, options)?;

    let created = !target.exists();
    fs::create_dir_all(target).map_err(|e| MaterializeError::Io {
        path: target.to_path_buf(),
        source: e,
    })?;
    let cleanup = scopeguard::guard(target.to_path_buf(), |path| {
        if created {
            log::debug!("Removing partially materialized '{}'", path.display());
            if let Err(e) = fs::remove_dir_all(&path) {
                log::warn!("Could not remove '{}': {}", path.display(), e);
            }
        }
    });

    let interpolator = Interpolator::new(context);
    let mut report = MaterializeReport::default();

    for file in files {
        let dest = target.join(&file.relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| MaterializeError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let verbatim = options
            .verbatim_dirs
            .iter()
            .any(|dir| file.relative.starts_with(dir));

        let bytes = match (verbatim, String::from_utf8(file.content)) {
            (false, Ok(text)) => {
                report.rendered += 1;
                interpolator
                    .expand_string(&text)
                    .map_err(|e| MaterializeError::Render {
                        path: file.relative.clone(),
                        source: e,
                    })?
                    .into_bytes()
            }
            (_, Ok(text)) => {
                report.copied += 1;
                text.into_bytes()
            }
            (_, Err(not_utf8)) => {
                report.copied += 1;
                not_utf8.into_bytes()
            }
        };

        fs::write(&dest, bytes).map_err(|e| MaterializeError::Io {
            path: dest.clone(),
            source: e,
        })?;
    }

    ScopeGuard::into_inner(cleanup);
    log::info!(
        "Materialized '{}' ({} rendered, {} copied)",
        target.display(),
        report.rendered,
        report.copied
    );
    Ok(report)
}

/// Loads every template file into memory, applying the dotfile filter.
fn read_template(
    source: &TemplateSource,
    options: &MaterializeOptions,
) -> Result<Vec<TemplateFile>, MaterializeError> {
    let keep = |relative: &Path| options.include_dotfiles || !is_hidden(relative);

    match source {
        TemplateSource::Builtin => Ok(BUILTIN_TEMPLATE
            .iter()
            .map(|(relative, content)| TemplateFile {
                relative: PathBuf::from(relative),
                content: content.as_bytes().to_vec(),
            })
            .filter(|f| keep(&f.relative))
            .collect()),
        TemplateSource::Directory(root) => {
            if !root.is_dir() {
                return Err(MaterializeError::TemplateNotFound(root.clone()));
            }

            let mut files = Vec::new();
            let walker = WalkDir::new(root)
                .min_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.path().strip_prefix(root).map_or(true, |rel| keep(rel)));

            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_dir() {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| entry.path().to_path_buf());
                let content = fs::read(entry.path()).map_err(|e| MaterializeError::Io {
                    path: entry.path().to_path_buf(),
                    source: e,
                })?;
                files.push(TemplateFile { relative, content });
            }
            Ok(files)
        }
    }
}

/// True if any component of the relative path starts with a dot.
fn is_hidden(relative: &Path) -> bool {
    relative.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}
