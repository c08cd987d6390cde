use crate::utils::error::{ReconError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 分隔符號只能是單一字元，且不能與數字或引號混淆
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<()> {
    if delimiter.is_alphanumeric() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a punctuation or whitespace character other than quotes and newlines".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ReconError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不滿足任何比較，也要擋下
    if !(value >= min && value <= max) {
        return Err(ReconError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert!(validate_delimiter("delimiter", ',').is_ok());
        assert!(validate_delimiter("delimiter", ';').is_ok());
        assert!(validate_delimiter("delimiter", '\t').is_ok());
        assert!(validate_delimiter("delimiter", 'a').is_err());
        assert!(validate_delimiter("delimiter", '"').is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input", "payouts.csv", &["csv", "txt"]).is_ok());
        assert!(validate_file_extension("input", "PAYOUTS.CSV", &["csv", "txt"]).is_ok());
        assert!(validate_file_extension("input", "payouts.xlsx", &["csv", "txt"]).is_err());
        assert!(validate_file_extension("input", "payouts", &["csv", "txt"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("retention.rate", 0.01, 0.0, 1.0).is_ok());
        assert!(validate_range("retention.rate", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("retention.rate", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("payouts.csv".to_string());
        let missing: Option<String> = None;
        assert!(validate_required_field("input", &present).is_ok());
        assert!(matches!(
            validate_required_field("input", &missing),
            Err(ReconError::MissingConfigError { .. })
        ));
    }
}
