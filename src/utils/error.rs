use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Model artifact not found: {path}")]
    ModelNotFound { path: String },

    #[error("Invalid model artifact: {message}")]
    ModelFormat { message: String },

    #[error("Training error: {message}")]
    TrainingError { message: String },

    #[error("Cannot read input '{path}': {source}")]
    InputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Model,
    Training,
    Input,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DetectorError {
    pub fn model_format(message: impl Into<String>) -> Self {
        Self::ModelFormat {
            message: message.into(),
        }
    }

    pub fn training(message: impl Into<String>) -> Self {
        Self::TrainingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Io,
            Self::ModelNotFound { .. } | Self::ModelFormat { .. } => ErrorCategory::Model,
            Self::TrainingError { .. } => ErrorCategory::Training,
            Self::InputError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // Nothing can be scored without a model.
            ErrorCategory::Model => ErrorSeverity::Critical,
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Training => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. } => {
                "Train a model with `dga-train --corpus <file>` or point --model at an existing artifact"
            }
            Self::ModelFormat { .. } => {
                "The model artifact is corrupt or from an incompatible version; retrain it with dga-train"
            }
            Self::TrainingError { .. } => {
                "Check that the corpus and sample files are non-empty and contain letters"
            }
            Self::InputError { .. } => "Check that the domain list exists and is readable",
            Self::IoError(_) => "Check file permissions and available disk space",
            Self::SerializationError(_) => "Check the output path is writable",
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax"
            }
            Self::MissingConfigError { .. } => {
                "Set the value in the configuration file or pass it on the command line"
            }
            Self::InvalidConfigValueError { .. } => {
                "Fix the offending value in the configuration file or command line"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ModelNotFound { path } => format!("No model found at '{}'", path),
            Self::ModelFormat { message } => format!("The model could not be loaded: {}", message),
            Self::InputError { path, .. } => format!("Could not read domain list '{}'", path),
            Self::MissingConfigError { field } => format!("'{}' must be set", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_are_critical() {
        let err = DetectorError::ModelNotFound {
            path: "model/dga_model.bin".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Model);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("model/dga_model.bin"));
    }

    #[test]
    fn test_config_errors_are_medium() {
        let err = DetectorError::InvalidConfigValueError {
            field: "heuristics.min_label_length".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("heuristics.min_label_length"));
    }

    #[test]
    fn test_missing_config_is_configuration_error() {
        let err = DetectorError::MissingConfigError {
            field: "model.path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "'model.path' must be set");
    }
}
