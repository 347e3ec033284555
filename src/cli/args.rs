// src/cli/args.rs
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)] // The command name has already been consumed by the dispatcher.
pub struct NewArgs {
    /// The extension bundle id (e.g. `com.acme.panel`). Asked interactively if omitted.
    #[arg(long)]
    pub id: Option<String>,

    /// The human-readable panel name. Asked interactively if omitted.
    #[arg(long)]
    pub name: Option<String>,

    /// The target Photoshop version label (e.g. "CC 2018"). See `cepgen versions`.
    #[arg(long = "ps-version")]
    pub ps_version: Option<String>,

    /// Parent directory for the new project. Defaults to the current directory.
    #[arg(long)]
    pub dir: Option<String>,

    /// Use a template directory instead of the built-in template.
    #[arg(long, short)]
    pub template: Option<String>,

    /// Remote debugging port written to `.debug`.
    #[arg(long = "debug-port")]
    pub debug_port: Option<u16>,

    /// Do not run the package manager.
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Do not download the CEP helper scripts.
    #[arg(long = "skip-download")]
    pub skip_download: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct CleanArgs {
    /// The project directory. Defaults to the current directory.
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct BuildArgs {
    /// The project directory. Defaults to the current directory.
    #[arg(long)]
    pub project: Option<String>,

    /// Empty the output directories before building.
    #[arg(long)]
    pub clean: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct DeployArgs {
    /// The project directory. Defaults to the current directory.
    #[arg(long)]
    pub project: Option<String>,

    /// Compare the deployed tree with the build output and roll back on mismatch.
    #[arg(long)]
    pub verify: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct VersionsArgs {
    /// Print the table as JSON.
    #[arg(long)]
    pub json: bool,
}
