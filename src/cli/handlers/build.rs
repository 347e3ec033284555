// src/cli/handlers/build.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{
    cli::args::BuildArgs,
    core::{builder, config_loader},
};

/// The handler for the `build` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let build_args = BuildArgs::try_parse_from(&args)?;
    let root = commons::resolve_project_root(build_args.project.as_deref())?;
    let descriptor = commons::load_project(&root)?;
    let config = config_loader::load_tool_config().with_context(|| t!("error.loading_config"))?;

    if build_args.clean {
        builder::clean(&root)?;
    }

    let report = builder::build(&root, &descriptor, &config.ui_build_command)
        .with_context(|| format!(t!("build.error.failed"), id = descriptor.id))?;

    println!("\n{}", t!("common.success").green().bold());
    println!(
        "  {}",
        format!(
            t!("build.info.assembled"),
            path = report.dist_dir.display(),
            count = report.files_copied + report.rendered.len()
        )
    );
    Ok(())
}
