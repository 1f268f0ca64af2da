use crate::core::classifier::Classifier;
use crate::core::features;
use crate::core::model::Model;
use crate::core::normalizer::Normalizer;
use crate::domain::model::{HeuristicThresholds, Outcome};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use std::sync::Arc;

/// Normalizer -> feature extraction -> transition score -> verdict, for one
/// domain at a time. Holds no per-domain state, so one instance can serve
/// any number of threads.
#[derive(Debug, Clone)]
pub struct Detector {
    model: Arc<Model>,
    normalizer: Normalizer,
    classifier: Classifier,
}

impl Detector {
    pub fn new(model: Arc<Model>) -> Self {
        Self {
            model,
            normalizer: Normalizer::default(),
            classifier: Classifier::default(),
        }
    }

    pub fn from_config<C: ConfigProvider>(model: Arc<Model>, config: &C) -> Self {
        Self::new(model)
            .with_thresholds(config.heuristics())
            .with_min_label_length(config.min_label_length())
    }

    /// Loads the model named by `config` and applies its heuristics.
    pub fn load<C: ConfigProvider>(config: &C) -> Result<Self> {
        let model = Model::from_file(config.model_path())?;
        tracing::info!(
            "📦 Model loaded from {} (threshold {:.4})",
            config.model_path(),
            model.threshold()
        );
        Ok(Self::from_config(Arc::new(model), config))
    }

    pub fn with_thresholds(mut self, thresholds: HeuristicThresholds) -> Self {
        self.classifier = Classifier::new(thresholds);
        self
    }

    pub fn with_min_label_length(mut self, min_label_length: usize) -> Self {
        self.normalizer = Normalizer::new(min_label_length);
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn check(&self, domain: &str) -> Outcome {
        match self.normalizer.normalize(domain) {
            Ok(label) => {
                let record = features::extract(&label);
                Outcome::Scored(self.classifier.classify(domain, record, &self.model))
            }
            Err(reason) => {
                tracing::debug!("Skipping {}: {}", domain, reason);
                Outcome::Skipped {
                    domain: domain.to_string(),
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transition::TransitionMatrix;
    use crate::config::DetectorSettings;
    use crate::domain::model::SkipReason;
    use crate::utils::error::DetectorError;
    use tempfile::TempDir;

    fn detector() -> Detector {
        let (matrix, observed) = TransitionMatrix::train(["google search engine", "mail news"]);
        Detector::new(Arc::new(Model::new(matrix, -3.0, observed)))
    }

    #[test]
    fn test_scores_registrable_label() {
        let outcome = detector().check("www.google.com");
        let verdict = outcome.verdict().expect("google.com should be scored");
        assert_eq!(verdict.domain, "www.google.com");
        assert_eq!(verdict.record.label, "google");
        assert_eq!(verdict.record.consonants, 3);
        assert_eq!(verdict.record.length, 6);
        assert!(!verdict.flags.any());
    }

    #[test]
    fn test_skips_are_reported() {
        assert_eq!(
            detector().check("secure.login.example.onion"),
            Outcome::Skipped {
                domain: "secure.login.example.onion".to_string(),
                reason: SkipReason::AnonymityNetwork,
            }
        );
        assert!(detector().check("abc.com").verdict().is_none());
    }

    #[test]
    fn test_min_label_length_override() {
        let detector = detector().with_min_label_length(3);
        assert!(detector.check("abc.com").verdict().is_some());
    }

    #[test]
    fn test_load_uses_configured_model_path() {
        let temp_dir = TempDir::new().unwrap();
        let model_path = temp_dir.path().join("models").join("dga.bin");
        let (matrix, observed) = TransitionMatrix::train(["google search engine"]);
        Model::new(matrix, -2.5, observed)
            .write_to_file(&model_path)
            .unwrap();

        let settings = DetectorSettings {
            model_path: model_path.to_string_lossy().to_string(),
            min_label_length: 3,
            ..DetectorSettings::default()
        };
        let detector = Detector::load(&settings).unwrap();
        assert_eq!(detector.model().threshold(), -2.5);
        assert!(detector.check("abc.com").verdict().is_some());
    }

    #[test]
    fn test_load_reports_missing_model() {
        let settings = DetectorSettings {
            model_path: "does/not/exist.bin".to_string(),
            ..DetectorSettings::default()
        };
        assert!(matches!(
            Detector::load(&settings),
            Err(DetectorError::ModelNotFound { .. })
        ));
    }
}
