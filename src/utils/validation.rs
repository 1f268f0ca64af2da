use crate::utils::error::{DetectorError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(DetectorError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DetectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DetectorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
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
    // NaN fails both comparisons, so reject it explicitly.
    if !(value >= min && value <= max) {
        return Err(DetectorError::InvalidConfigValueError {
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
        assert!(validate_path("output.path", "dga_domains.json").is_ok());
        assert!(matches!(
            validate_path("output.path", ""),
            Err(DetectorError::MissingConfigError { field }) if field == "output.path"
        ));
        assert!(validate_path("output.path", "   ").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("heuristics.min_label_length", 6, 1).is_ok());
        assert!(validate_positive_number("heuristics.min_label_length", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("heuristics.entropy_threshold", 3.8, 0.0, 16.0).is_ok());
        assert!(validate_range("heuristics.entropy_threshold", f64::NAN, 0.0, 16.0).is_err());
        assert!(validate_range("heuristics.entropy_threshold", -1.0, 0.0, 16.0).is_err());
    }
}
