use crate::utils::error::{DetectorError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("environment variable pattern is valid")
});

/// Optional configuration file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub model: Option<ModelSection>,
    pub heuristics: Option<HeuristicsSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeuristicsSection {
    pub entropy_threshold: Option<f64>,
    pub consonant_threshold: Option<usize>,
    pub length_threshold: Option<usize>,
    pub min_label_length: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub path: Option<String>,
    pub parallel: Option<bool>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| DetectorError::ConfigError {
            message: format!("cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DetectorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn model_path(&self) -> Option<&str> {
        self.model.as_ref()?.path.as_deref()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref()?.path.as_deref()
    }

    pub fn parallel(&self) -> Option<bool> {
        self.output.as_ref()?.parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[model]
path = "models/prod.bin"

[heuristics]
entropy_threshold = 4.0
consonant_threshold = 8
length_threshold = 15
min_label_length = 5

[output]
path = "out/results.json"
parallel = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model_path(), Some("models/prod.bin"));
        assert_eq!(config.output_path(), Some("out/results.json"));
        assert_eq!(config.parallel(), Some(true));
        let heuristics = config.heuristics.unwrap();
        assert_eq!(heuristics.entropy_threshold, Some(4.0));
        assert_eq!(heuristics.min_label_length, Some(5));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.model_path().is_none());
        assert!(config.parallel().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DGA_TEST_MODEL_DIR", "/var/lib/dga");

        let config =
            TomlConfig::from_toml_str("[model]\npath = \"${DGA_TEST_MODEL_DIR}/model.bin\"\n")
                .unwrap();
        assert_eq!(config.model_path(), Some("/var/lib/dga/model.bin"));

        std::env::remove_var("DGA_TEST_MODEL_DIR");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = TomlConfig::from_toml_str("[output]\nformat = \"csv\"\n");
        assert!(matches!(
            result,
            Err(DetectorError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"from-file.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), Some("from-file.json"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = TomlConfig::from_file("/nonexistent/dga-detector.toml");
        assert!(matches!(result, Err(DetectorError::ConfigError { .. })));
    }
}
