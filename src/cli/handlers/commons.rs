// src/cli/handlers/commons.rs

// Shared helpers for the command handlers.

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use dialoguer::{Input, MultiSelect, theme::ColorfulTheme};
use std::{env, path::PathBuf};

use crate::{
    core::{
        descriptor::{self, metadata_path},
        paths,
        validators::{self, ValidationError},
    },
    models::ExtensionDescriptor,
};

/// Resolves `--project` (or the current directory) to an absolute path.
pub fn resolve_project_root(project: Option<&str>) -> Result<PathBuf> {
    let root = match project {
        Some(p) => {
            let expanded = paths::expand_path(p)?;
            if expanded.is_absolute() {
                expanded
            } else {
                env::current_dir()?.join(expanded)
            }
        }
        None => env::current_dir()?,
    };
    Ok(dunce::simplified(&root).to_path_buf())
}

/// Loads the descriptor of the project at `root`, with a friendly error when
/// the directory is not a generated project.
pub fn load_project(root: &std::path::Path) -> Result<ExtensionDescriptor> {
    if !metadata_path(root).is_file() {
        return Err(anyhow!(t!("error.not_a_project"), path = root.display()));
    }
    descriptor::load_descriptor(root).with_context(|| t!("error.loading_descriptor"))
}

/// Prompts for a line of text until `validate` accepts it.
pub fn prompt_text(
    prompt: &str,
    validate: fn(Option<&str>) -> Result<(), ValidationError>,
) -> Result<String> {
    loop {
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        match validate(Some(input.as_str())) {
            Ok(()) => return Ok(input),
            Err(e) => {
                println!("{}", format!("Error: {}", e).red());
                continue;
            }
        }
    }
}

/// Checkbox prompt that must end with exactly one ticked item.
pub fn prompt_single_checkbox(prompt: &str, items: &[&str], preselected: &str) -> Result<String> {
    let defaults: Vec<bool> = items.iter().map(|item| *item == preselected).collect();

    loop {
        let selection = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .defaults(&defaults)
            .interact()?;

        match validators::validate_exactly_one_selected(&selection) {
            Ok(()) => {
                if let Some(label) = selection.first().and_then(|&i| items.get(i)) {
                    return Ok(label.to_string());
                }
            }
            Err(e) => println!("{}", format!("Error: {}", e).red()),
        }
    }
}
