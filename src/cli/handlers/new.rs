// src/cli/handlers/new.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::{env, path::PathBuf, time::Duration};

use super::commons;
use crate::{
    cli::args::NewArgs,
    constants::{CEP_LIBS_DIR, DEFAULT_VERSION_LABEL},
    core::{
        config_loader,
        descriptor::{self, DescriptorSettings},
        fetcher::{self, HttpDownloader},
        installer,
        materializer::{self, MaterializeOptions, TemplateSource},
        paths, validators,
        version_map::VersionMap,
    },
    models::{Answers, ToolConfig},
};

/// The handler for the `new` command: scaffolds a CEP extension project.
pub fn handle(args: Vec<String>) -> Result<()> {
    let new_args = NewArgs::try_parse_from(&args)?;
    let config = config_loader::load_tool_config().with_context(|| t!("error.loading_config"))?;
    scaffold(&new_args, &config).map(|_| ())
}

/// Creates the project described by `new_args` and returns its root.
///
/// Steps run strictly in order: answers, descriptor, template, metadata file,
/// dependency install, helper download. A failure stops the run.
fn scaffold(new_args: &NewArgs, config: &ToolConfig) -> Result<PathBuf> {
    let version_map = VersionMap::builtin();

    // 1. Answers (flags first, prompts for the rest)
    let answers = collect_answers(new_args, &version_map)?;

    // 2. Descriptor
    let extensions_dir = paths::resolve_extensions_dir(config.extensions_dir.as_deref())?;
    let settings = DescriptorSettings {
        extensions_dir,
        debug_port: new_args.debug_port.unwrap_or(config.debug_port),
    };
    let descriptor = descriptor::build_descriptor(&answers, &version_map, &settings)?;

    // 3. Template
    let parent_dir = match new_args.dir.as_deref() {
        Some(dir) => commons::resolve_project_root(Some(dir))?,
        None => env::current_dir()?,
    };
    let project_root = parent_dir.join(&descriptor.id);
    let source = resolve_template_source(new_args, config)?;

    println!(
        "{}",
        format!(t!("new.info.creating"), path = project_root.display()).bold()
    );
    materializer::materialize(
        &source,
        &project_root,
        &descriptor::template_context(&descriptor),
        &MaterializeOptions::default(),
    )?;

    // 4. Metadata consumed by build/deploy
    descriptor::save_descriptor(&project_root, &descriptor)?;

    // 5. Dependencies
    if new_args.skip_install {
        println!("  {}", t!("new.info.install_skipped").dimmed());
    } else {
        installer::install_dependencies(
            &project_root,
            &config.install_command,
            &config.install_subdirs,
        )?;
    }

    // 6. CEP helper scripts
    if new_args.skip_download {
        println!("  {}", t!("new.info.download_skipped").dimmed());
    } else {
        let downloader = HttpDownloader::new(Duration::from_secs(config.download_timeout_secs))?;
        fetcher::fetch_cep_helpers(
            &downloader,
            &descriptor.runtime_download_base_url,
            &project_root.join(CEP_LIBS_DIR),
        )?;
    }

    println!("\n{}", t!("common.success").green().bold());
    println!(
        "  {} '{}' (Photoshop {} / CEP {})",
        descriptor.name,
        descriptor.id,
        descriptor.platform_version_name,
        descriptor.runtime_version_id
    );
    println!("  {}", format!(t!("new.info.deploys_to"), path = descriptor.deployment_dir.display()));
    println!("  {}", format!(t!("new.info.next_steps"), path = project_root.display()).cyan());

    Ok(project_root)
}

/// Gathers the three answers. Flag values are validated the same way as
/// prompt input; an invalid flag is a hard error instead of a re-prompt.
fn collect_answers(args: &NewArgs, version_map: &VersionMap) -> Result<Answers> {
    let extension_id = match &args.id {
        Some(id) => {
            validators::validate_identifier(Some(id.as_str()))
                .map_err(|e| anyhow!(t!("new.error.invalid_flag"), flag = "--id", message = e))?;
            id.clone()
        }
        None => commons::prompt_text(t!("new.prompt.id"), validators::validate_identifier)?,
    };

    let extension_name = match &args.name {
        Some(name) => {
            validators::validate_non_empty(Some(name.as_str()))
                .map_err(|e| anyhow!(t!("new.error.invalid_flag"), flag = "--name", message = e))?;
            name.clone()
        }
        None => commons::prompt_text(t!("new.prompt.name"), validators::validate_non_empty)?,
    };

    let platform_version_name = match &args.ps_version {
        Some(label) => label.clone(),
        None => {
            let labels = version_map.labels();
            commons::prompt_single_checkbox(t!("new.prompt.version"), &labels, DEFAULT_VERSION_LABEL)?
        }
    };

    Ok(Answers {
        extension_id,
        extension_name,
        platform_version_names: vec![platform_version_name],
    })
}

/// `--template` wins over `template_dir` from the config; otherwise the
/// built-in template is used.
fn resolve_template_source(args: &NewArgs, config: &ToolConfig) -> Result<TemplateSource> {
    let Some(dir) = args.template.as_deref().or(config.template_dir.as_deref()) else {
        return Ok(TemplateSource::Builtin);
    };
    let path: PathBuf = commons::resolve_project_root(Some(dir))?;
    log::debug!("Using template directory '{}'", path.display());
    Ok(TemplateSource::Directory(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn flags(id: &str, name: &str, version: &str) -> NewArgs {
        NewArgs {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ps_version: Some(version.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_collect_answers_from_flags() {
        let answers =
            collect_answers(&flags("com.acme.panel", "Acme", "CC 2017"), &VersionMap::builtin()).unwrap();
        assert_eq!(answers.extension_id, "com.acme.panel");
        assert_eq!(answers.extension_name, "Acme");
        assert_eq!(answers.platform_version_names, vec!["CC 2017".to_string()]);
    }

    #[test]
    fn test_invalid_flags_are_hard_errors() {
        let map = VersionMap::builtin();
        let err = collect_answers(&flags("bad id", "Acme", "CC 2017"), &map).unwrap_err();
        assert!(err.to_string().contains("--id"));

        let err = collect_answers(&flags("ok", "   ", "CC 2017"), &map).unwrap_err();
        assert!(err.to_string().contains("--name"));
    }

    #[test]
    fn test_template_source_resolution() {
        let config = ToolConfig::default();
        assert_eq!(
            resolve_template_source(&NewArgs::default(), &config).unwrap(),
            TemplateSource::Builtin
        );

        let dir = TempDir::new().unwrap();
        let from_config = ToolConfig {
            template_dir: dir.path().to_str().map(String::from),
            ..ToolConfig::default()
        };
        assert!(matches!(
            resolve_template_source(&NewArgs::default(), &from_config).unwrap(),
            TemplateSource::Directory(_)
        ));
    }

    #[test]
    fn test_new_scaffolds_project_offline() {
        let dir = TempDir::new().unwrap();
        let extensions = dir.path().join("cep/extensions");
        let config = ToolConfig {
            extensions_dir: extensions.to_str().map(String::from),
            ..ToolConfig::default()
        };
        let args = NewArgs {
            dir: dir.path().join("work").to_str().map(String::from),
            skip_install: true,
            skip_download: true,
            ..flags("com.acme.panel", "Acme Panel", "CC 2018")
        };
        fs::create_dir_all(dir.path().join("work")).unwrap();

        let root = scaffold(&args, &config).unwrap();

        assert_eq!(root, dunce::simplified(&dir.path().join("work/com.acme.panel")));
        let saved = descriptor::load_descriptor(&root).unwrap();
        assert_eq!(saved.name, "Acme Panel");
        assert_eq!(saved.platform_version_id, "19.0");
        assert_eq!(saved.runtime_version_id, "8.0");
        assert_eq!(saved.deployment_dir, extensions.join("com.acme.panel"));
        assert!(root.join(".templates/manifest.xml").is_file());
    }

    #[test]
    fn test_handle_rejects_unknown_flags() {
        assert!(handle(vec!["--no-such-flag".into()]).is_err());
    }
}
