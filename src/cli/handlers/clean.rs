// src/cli/handlers/clean.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{cli::args::CleanArgs, core::builder};

/// The handler for the `clean` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let clean_args = CleanArgs::try_parse_from(&args)?;
    let root = commons::resolve_project_root(clean_args.project.as_deref())?;
    commons::load_project(&root)?;

    let removed = builder::clean(&root)?;
    println!("{} {}", "clean".cyan(), format!(t!("clean.info.removed"), count = removed));
    Ok(())
}
