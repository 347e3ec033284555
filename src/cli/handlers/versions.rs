// src/cli/handlers/versions.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::{cli::args::VersionsArgs, constants::DEFAULT_VERSION_LABEL, core::version_map::VersionMap};

/// The handler for the `versions` command. Prints the supported Photoshop releases.
pub fn handle(args: Vec<String>) -> Result<()> {
    let versions_args = VersionsArgs::try_parse_from(&args)?;
    let version_map = VersionMap::builtin();

    if versions_args.json {
        let table: serde_json::Map<String, serde_json::Value> = version_map
            .iter()
            .map(|(label, mapping)| -> Result<_, serde_json::Error> {
                Ok((label.to_string(), serde_json::to_value(mapping)?))
            })
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("{}", t!("versions.header").bold());
    for (label, mapping) in version_map.iter() {
        let marker = if *label == DEFAULT_VERSION_LABEL { "*" } else { " " };
        println!(
            "{} {:<10} {:<8} {:<5} {}",
            marker.green(),
            label.cyan(),
            mapping.platform_version_id,
            mapping.runtime_version_id,
            mapping.runtime_download_base_url.dimmed()
        );
    }
    Ok(())
}
