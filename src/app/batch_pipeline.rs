use crate::core::detector::Detector;
use crate::core::{BatchOutcome, ConfigProvider, Outcome, Pipeline, Storage};
use crate::domain::model::VerdictRecord;
use crate::utils::error::{DetectorError, Result};
use rayon::prelude::*;

/// Batch mode: a newline-delimited domain list in, a JSON array of
/// verdict records out.
pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    detector: Detector,
    input_path: String,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(storage: S, config: C, detector: Detector, input_path: impl Into<String>) -> Self {
        Self {
            storage,
            config,
            detector,
            input_path: input_path.into(),
        }
    }
}

fn tally(outcome: &mut BatchOutcome, result: Outcome) {
    match result {
        Outcome::Scored(verdict) => outcome.records.push(VerdictRecord::from(&verdict)),
        Outcome::Skipped { domain, reason } => {
            println!("{}", reason.message());
            tracing::info!("Skipped {} ({})", domain, reason);
            outcome.skipped.push((domain, reason));
        }
    }
}

/// Splits file contents into trimmed, non-blank domain lines.
pub fn parse_domain_list(data: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(data)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    fn extract(&self) -> Result<Vec<String>> {
        tracing::debug!("Reading domains from {}", self.input_path);
        let data = self.storage.read_file(&self.input_path).map_err(|e| match e {
            DetectorError::IoError(source) => DetectorError::InputError {
                path: self.input_path.clone(),
                source,
            },
            other => other,
        })?;
        Ok(parse_domain_list(&data))
    }

    fn transform(&self, domains: Vec<String>) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        if self.config.parallel() {
            tracing::debug!("Classifying {} domains in parallel", domains.len());
            let results: Vec<Outcome> = domains.par_iter().map(|d| self.detector.check(d)).collect();
            for (domain, result) in domains.iter().zip(results) {
                println!("Working on {}", domain);
                tally(&mut outcome, result);
            }
        } else {
            for domain in &domains {
                println!("Working on {}", domain);
                tally(&mut outcome, self.detector.check(domain));
            }
        }

        Ok(outcome)
    }

    fn load(&self, outcome: &BatchOutcome) -> Result<String> {
        let output_path = self.config.output_path();
        let json = serde_json::to_vec_pretty(&outcome.records)?;
        self.storage.write_file(output_path, &json)?;
        println!("File {} is created", output_path);
        Ok(output_path.to_string())
    }
}
