// src/cli/handlers/deploy.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{
    cli::args::DeployArgs,
    constants::DIST_DIR,
    core::deploy::{self, DeployOptions},
};

/// The handler for the `deploy` command: installs `dist/` into the CEP
/// extensions directory recorded in the project's descriptor.
pub fn handle(args: Vec<String>) -> Result<()> {
    let deploy_args = DeployArgs::try_parse_from(&args)?;
    let root = commons::resolve_project_root(deploy_args.project.as_deref())?;
    let descriptor = commons::load_project(&root)?;

    let build_dir = root.join(DIST_DIR);
    let target = &descriptor.deployment_dir;
    println!(
        "{} {} -> {}",
        "deploy".cyan(),
        build_dir.display(),
        target.display()
    );

    let report = deploy::deploy(
        &build_dir,
        target,
        DeployOptions {
            verify: deploy_args.verify,
        },
    )
    .with_context(|| format!(t!("deploy.error.failed"), id = descriptor.id))?;

    if let Some(backup) = &report.leftover_backup {
        println!(
            "{}",
            format!(t!("deploy.warning.leftover_backup"), path = backup.display()).yellow()
        );
    }

    println!("\n{}", t!("common.success").green().bold());
    let summary = if report.replaced_previous {
        t!("deploy.info.replaced")
    } else {
        t!("deploy.info.installed")
    };
    println!("  {} ({} files)", summary, report.files_copied);
    Ok(())
}
