// src/cli/handlers/mod.rs

// One module per CLI command.

pub mod build;
pub mod clean;
pub mod commons;
pub mod deploy;
pub mod new;
pub mod versions;
