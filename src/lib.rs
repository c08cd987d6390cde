pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::ReconConfig};
pub use core::{
    derivation::RetentionPolicy,
    etl::{EtlEngine, RunOutcome},
    pipeline::{reconcile, ReconPipeline},
};
pub use domain::model::{Dataset, ReconRecord, ReconReport, ReconWarning, TOTALS_LABEL};
pub use utils::error::{ReconError, Result};
