use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("Invalid payout file '{file_name}': no header or data lines found")]
    InvalidFile { file_name: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReconError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReconError::InvalidFile { .. } => ErrorCategory::Input,
            ReconError::ConfigError { .. }
            | ReconError::ConfigValidationError { .. }
            | ReconError::InvalidConfigValueError { .. }
            | ReconError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ReconError::IoError(_) | ReconError::ZipError(_) => ErrorCategory::Storage,
            ReconError::SerializationError(_) => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReconError::InvalidFile { .. } => ErrorSeverity::High,
            ReconError::ConfigError { .. }
            | ReconError::ConfigValidationError { .. }
            | ReconError::InvalidConfigValueError { .. }
            | ReconError::MissingConfigError { .. } => ErrorSeverity::High,
            // 檔案系統暫時性問題，重試可能成功
            ReconError::IoError(_) => ErrorSeverity::Medium,
            ReconError::ZipError(_) | ReconError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReconError::InvalidFile { .. } => {
                "Export the payout report again and make sure it contains a header line".to_string()
            }
            ReconError::ConfigError { .. } | ReconError::ConfigValidationError { .. } => {
                "Check the configuration file syntax and required sections".to_string()
            }
            ReconError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            ReconError::MissingConfigError { field } => {
                format!("Provide '{}' via command line or configuration file", field)
            }
            ReconError::IoError(_) => {
                "Verify the input file exists and the output directory is writable".to_string()
            }
            ReconError::ZipError(_) => "Disable compression or free disk space".to_string(),
            ReconError::SerializationError(_) => {
                "Run again with --verbose and report the log output".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReconError::InvalidFile { file_name } => {
                format!("The file '{}' is empty or not a valid payout export", file_name)
            }
            ReconError::IoError(e) => format!("Could not access a file: {}", e),
            ReconError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
