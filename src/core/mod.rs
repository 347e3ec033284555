// src/core/mod.rs

pub mod builder;
pub mod builtin_template;
pub mod config_loader;
pub mod deploy;
pub mod descriptor;
pub mod digest;
pub mod fetcher;
pub mod fs_ops;
pub mod installer;
pub mod interpolator;
pub mod materializer;
pub mod paths;
pub mod validators;
pub mod version_map;
