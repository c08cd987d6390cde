use super::{ALLOWED_INPUT_EXTENSIONS, DEFAULT_REPORT_FILENAME};
use crate::core::derivation::{RetentionPolicy, DEFAULT_PLATFORM_KEYWORD, DEFAULT_RETENTION_RATE};
use crate::core::format::DEFAULT_CURRENCY_SYMBOL;
use crate::core::parser::{DEFAULT_DELIMITER, PREVIEW_ROWS};
use crate::core::ConfigProvider;
use crate::utils::error::{ReconError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconConfig {
    pub input: InputConfig,
    pub report: ReportConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// 可留空，由命令列 `--input` 提供
    pub path: Option<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default)]
    pub compression: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    #[serde(default = "default_platform_keyword")]
    pub platform_keyword: String,
    #[serde(default = "default_retention_rate")]
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_filename() -> String {
    DEFAULT_REPORT_FILENAME.to_string()
}

fn default_platform_keyword() -> String {
    DEFAULT_PLATFORM_KEYWORD.to_string()
}

fn default_retention_rate() -> f64 {
    DEFAULT_RETENTION_RATE
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_preview_rows() -> usize {
    PREVIEW_ROWS
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            platform_keyword: default_platform_keyword(),
            rate: default_retention_rate(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            preview_rows: default_preview_rows(),
        }
    }
}

impl ReconConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReconError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PAYOUT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReconError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl ConfigProvider for ReconConfig {
    fn input_path(&self) -> &str {
        self.input.path.as_deref().unwrap_or("")
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }

    fn delimiter(&self) -> char {
        self.input.delimiter
    }

    fn report_filename(&self) -> &str {
        &self.report.filename
    }

    fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            platform_keyword: self.retention.platform_keyword.clone(),
            rate: self.retention.rate,
        }
    }

    fn compression_enabled(&self) -> bool {
        self.report.compression
    }
}

impl Validate for ReconConfig {
    fn validate(&self) -> Result<()> {
        let input = validation::validate_required_field("input.path", &self.input.path)?;
        validation::validate_path("input.path", input)?;
        validation::validate_file_extension("input.path", input, &ALLOWED_INPUT_EXTENSIONS)?;
        validation::validate_delimiter("input.delimiter", self.input.delimiter)?;

        validation::validate_path("report.output_path", &self.report.output_path)?;
        validation::validate_non_empty_string("report.filename", &self.report.filename)?;

        validation::validate_non_empty_string(
            "retention.platform_keyword",
            &self.retention.platform_keyword,
        )?;
        validation::validate_range("retention.rate", self.retention.rate, 0.0, 1.0)?;

        validation::validate_non_empty_string(
            "display.currency_symbol",
            &self.display.currency_symbol,
        )?;
        // 預覽最多只解析 PREVIEW_ROWS 筆
        validation::validate_range("display.preview_rows", self.display.preview_rows, 0, PREVIEW_ROWS)?;

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format.to_lowercase().as_str()) {
                return Err(ReconError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
