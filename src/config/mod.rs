pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
mod args;

#[cfg(feature = "cli")]
pub use args::CliConfig;

pub const DEFAULT_REPORT_FILENAME: &str = "conciliacion_pagos_marketplaces_{timestamp}";
pub const ALLOWED_INPUT_EXTENSIONS: [&str; 2] = ["csv", "txt"];
