// src/bin/cepgen.rs

use cepgen::cli::{Cli, dispatcher};
use clap::Parser;
use colored::*;

/// Sets up logging, parses the command line and reports any error.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    if let Err(e) = dispatcher::dispatch(cli.args) {
        // `{:#}` includes the whole context chain on one line.
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
