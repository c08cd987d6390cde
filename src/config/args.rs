use super::{ALLOWED_INPUT_EXTENSIONS, DEFAULT_REPORT_FILENAME};
use crate::core::derivation::{RetentionPolicy, DEFAULT_PLATFORM_KEYWORD, DEFAULT_RETENTION_RATE};
use crate::core::parser::DEFAULT_DELIMITER;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "payout-recon")]
#[command(about = "Reconcile marketplace payout exports into an accounting report")]
pub struct CliConfig {
    /// Payout transaction export (CSV)
    #[arg(long, short)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Report file name without extension; `{timestamp}` is expanded
    #[arg(long, default_value = DEFAULT_REPORT_FILENAME)]
    pub filename: String,

    #[arg(long, default_value = DEFAULT_PLATFORM_KEYWORD)]
    pub retention_platform: String,

    #[arg(long, default_value_t = DEFAULT_RETENTION_RATE)]
    pub retention_rate: f64,

    #[arg(long, help = "Bundle the report and a JSON summary into a zip file")]
    pub compress: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn report_filename(&self) -> &str {
        &self.filename
    }

    fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            platform_keyword: self.retention_platform.clone(),
            rate: self.retention_rate,
        }
    }

    fn compression_enabled(&self) -> bool {
        self.compress
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension("input", &self.input, &ALLOWED_INPUT_EXTENSIONS)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_delimiter("delimiter", self.delimiter)?;
        validation::validate_non_empty_string("filename", &self.filename)?;
        validation::validate_non_empty_string("retention_platform", &self.retention_platform)?;
        validation::validate_range("retention_rate", self.retention_rate, 0.0, 1.0)?;
        Ok(())
    }
}
