pub mod cli;
pub mod toml_config;

use crate::core::model::DEFAULT_MODEL_PATH;
use crate::core::normalizer::DEFAULT_MIN_LABEL_LENGTH;
use crate::core::ConfigProvider;
use crate::domain::model::HeuristicThresholds;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_OUTPUT_PATH: &str = "dga_domains.json";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dga-detector")]
#[command(about = "DGA domain detection")]
pub struct CliConfig {
    /// Domain to check
    #[arg(short, long, conflicts_with = "file")]
    pub domain: Option<String>,

    /// File with domains. One per line
    #[arg(short, long)]
    pub file: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Model artifact produced by dga-train
    #[arg(long)]
    pub model: Option<String>,

    /// Where batch mode writes its JSON results
    #[arg(short, long)]
    pub output: Option<String>,

    /// Classify batch input on all cores
    #[arg(long)]
    pub parallel: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

/// Fully resolved settings: CLI flag, then config file, then built-in default.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorSettings {
    pub model_path: String,
    pub output_path: String,
    pub heuristics: HeuristicThresholds,
    pub min_label_length: usize,
    pub parallel: bool,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            heuristics: HeuristicThresholds::default(),
            min_label_length: DEFAULT_MIN_LABEL_LENGTH,
            parallel: false,
        }
    }
}

impl DetectorSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self::default();
        if let Some(path) = config.model_path() {
            settings.model_path = path.to_string();
        }
        if let Some(path) = config.output_path() {
            settings.output_path = path.to_string();
        }
        if let Some(parallel) = config.parallel() {
            settings.parallel = parallel;
        }
        if let Some(heuristics) = &config.heuristics {
            if let Some(entropy) = heuristics.entropy_threshold {
                settings.heuristics.entropy = entropy;
            }
            if let Some(consonants) = heuristics.consonant_threshold {
                settings.heuristics.consonants = consonants;
            }
            if let Some(length) = heuristics.length_threshold {
                settings.heuristics.length = length;
            }
            if let Some(min) = heuristics.min_label_length {
                settings.min_label_length = min;
            }
        }
        settings
    }

    pub fn with_overrides(mut self, model: Option<&str>, output: Option<&str>, parallel: bool) -> Self {
        if let Some(model) = model {
            self.model_path = model.to_string();
        }
        if let Some(output) = output {
            self.output_path = output.to_string();
        }
        // A bare flag can only switch parallelism on.
        self.parallel |= parallel;
        self
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                Self::from_toml(&TomlConfig::from_file(path)?)
            }
            None => Self::default(),
        };
        Ok(base.with_overrides(cli.model.as_deref(), cli.output.as_deref(), cli.parallel))
    }
}

impl ConfigProvider for DetectorSettings {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn heuristics(&self) -> HeuristicThresholds {
        self.heuristics
    }

    fn min_label_length(&self) -> usize {
        self.min_label_length
    }

    fn parallel(&self) -> bool {
        self.parallel
    }
}

impl Validate for DetectorSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("model.path", &self.model_path)?;
        validation::validate_path("output.path", &self.output_path)?;
        validation::validate_range("heuristics.entropy_threshold", self.heuristics.entropy, 0.0, 64.0)?;
        validation::validate_positive_number("heuristics.min_label_length", self.min_label_length, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DetectorError;

    #[test]
    fn test_defaults() {
        let settings = DetectorSettings::default();
        assert_eq!(settings.model_path(), "model/dga_model.bin");
        assert_eq!(settings.output_path(), "dga_domains.json");
        assert_eq!(settings.heuristics().entropy, 3.8);
        assert_eq!(settings.heuristics().consonants, 7);
        assert_eq!(settings.heuristics().length, 12);
        assert_eq!(settings.min_label_length(), 6);
        assert!(!settings.parallel());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_toml_layers_over_defaults() {
        let config = TomlConfig::from_toml_str(
            "[heuristics]\nlength_threshold = 20\n[output]\npath = \"x.json\"\n",
        )
        .unwrap();
        let settings = DetectorSettings::from_toml(&config);
        assert_eq!(settings.heuristics.length, 20);
        assert_eq!(settings.heuristics.entropy, 3.8);
        assert_eq!(settings.output_path, "x.json");
        assert_eq!(settings.model_path, "model/dga_model.bin");
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = TomlConfig::from_toml_str("[model]\npath = \"from-toml.bin\"\n").unwrap();
        let settings = DetectorSettings::from_toml(&config).with_overrides(
            Some("from-cli.bin"),
            None,
            true,
        );
        assert_eq!(settings.model_path, "from-cli.bin");
        assert_eq!(settings.output_path, "dga_domains.json");
        assert!(settings.parallel);
    }

    #[test]
    fn test_invalid_settings_fail_validation() {
        let settings = DetectorSettings {
            min_label_length: 0,
            ..DetectorSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = DetectorSettings {
            heuristics: HeuristicThresholds {
                entropy: f64::NAN,
                ..HeuristicThresholds::default()
            },
            ..DetectorSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = DetectorSettings {
            model_path: String::new(),
            ..DetectorSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(DetectorError::MissingConfigError { field }) if field == "model.path"
        ));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_parsing() {
        let cli = CliConfig::parse_from(["dga-detector", "-d", "www.google.com", "--model", "m.bin"]);
        assert_eq!(cli.domain.as_deref(), Some("www.google.com"));
        let settings = DetectorSettings::from_cli(&cli).unwrap();
        assert_eq!(settings.model_path, "m.bin");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_domain_and_file_conflict() {
        let result = CliConfig::try_parse_from(["dga-detector", "-d", "a.com", "-f", "list.txt"]);
        assert!(result.is_err());
    }
}
