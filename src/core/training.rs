//! Offline model training: pair counting over a corpus and threshold
//! selection against known-good and known-bad labels.

use crate::core::alphabet::LETTERS;
use crate::core::model::Model;
use crate::core::transition::TransitionMatrix;
use crate::utils::error::{DetectorError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_RANDOM_SAMPLES: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;
pub const RANDOM_MIN_LEN: usize = 8;
pub const RANDOM_MAX_LEN: usize = 20;

/// How well the chosen threshold separates the two sample sets.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub threshold: f64,
    pub min_good: f64,
    pub max_bad: f64,
    pub good_samples: usize,
    pub bad_samples: usize,
    pub correct: usize,
    pub pairs_observed: u64,
}

impl TrainingSummary {
    /// True when every good label scores above every bad label.
    pub fn separable(&self) -> bool {
        self.min_good > self.max_bad
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.good_samples + self.bad_samples;
        if total == 0 {
            return 0.0;
        }
        self.correct as f64 / total as f64
    }
}

/// Reproducible random lowercase strings, used as the gibberish population
/// when no bad samples are supplied.
pub fn random_labels(count: usize, seed: u64) -> Vec<String> {
    let letters = LETTERS.as_bytes();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.random_range(RANDOM_MIN_LEN..=RANDOM_MAX_LEN);
            (0..len)
                .map(|_| letters[rng.random_range(0..letters.len())] as char)
                .collect()
        })
        .collect()
}

/// Number of samples classified correctly by `threshold` under the
/// "DGA when score <= threshold" rule.
fn correct_at(threshold: f64, good: &[f64], bad: &[f64]) -> usize {
    good.iter().filter(|&&s| s > threshold).count() + bad.iter().filter(|&&s| s <= threshold).count()
}

/// Picks the cutoff between good and bad scores.
///
/// Cleanly separated populations get the midpoint between the lowest good
/// score and the highest bad score. Otherwise every midpoint between
/// consecutive distinct scores is tried and the most accurate one wins,
/// lowest cut first on ties.
pub fn choose_threshold(good: &[f64], bad: &[f64]) -> Result<f64> {
    if good.is_empty() || bad.is_empty() {
        return Err(DetectorError::training(
            "threshold selection needs at least one good and one bad sample",
        ));
    }

    let min_good = good.iter().copied().fold(f64::INFINITY, f64::min);
    let max_bad = bad.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min_good > max_bad {
        return Ok((min_good + max_bad) / 2.0);
    }

    let mut scores: Vec<f64> = good.iter().chain(bad.iter()).copied().collect();
    scores.sort_by(|a, b| a.total_cmp(b));
    scores.dedup();

    let mut best = (scores[0], correct_at(scores[0], good, bad));
    for window in scores.windows(2) {
        let cut = (window[0] + window[1]) / 2.0;
        let correct = correct_at(cut, good, bad);
        if correct > best.1 {
            best = (cut, correct);
        }
    }
    Ok(best.0)
}

/// Builds a model from a corpus and two labelled sample sets.
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer {
    corpus: Vec<String>,
    good: Vec<String>,
    bad: Vec<String>,
}

impl ModelTrainer {
    pub fn new(corpus: Vec<String>) -> Self {
        Self {
            corpus,
            good: Vec::new(),
            bad: Vec::new(),
        }
    }

    pub fn with_good(mut self, good: Vec<String>) -> Self {
        self.good = good;
        self
    }

    pub fn with_bad(mut self, bad: Vec<String>) -> Self {
        self.bad = bad;
        self
    }

    pub fn train(&self) -> Result<(Model, TrainingSummary)> {
        let (matrix, pairs_observed) = TransitionMatrix::train(&self.corpus);
        if pairs_observed == 0 {
            return Err(DetectorError::training(
                "corpus contains no adjacent character pairs",
            ));
        }
        tracing::debug!("Counted {} character pairs", pairs_observed);

        // Without explicit good samples the corpus itself is the legitimate population.
        let good_source = if self.good.is_empty() {
            &self.corpus
        } else {
            &self.good
        };
        let good: Vec<f64> = good_source
            .iter()
            .filter(|label| !label.trim().is_empty())
            .map(|label| matrix.average_log_prob(label.trim()))
            .collect();
        let bad: Vec<f64> = self
            .bad
            .iter()
            .filter(|label| !label.trim().is_empty())
            .map(|label| matrix.average_log_prob(label.trim()))
            .collect();

        let threshold = choose_threshold(&good, &bad)?;
        let summary = TrainingSummary {
            threshold,
            min_good: good.iter().copied().fold(f64::INFINITY, f64::min),
            max_bad: bad.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            good_samples: good.len(),
            bad_samples: bad.len(),
            correct: correct_at(threshold, &good, &bad),
            pairs_observed,
        };

        Ok((Model::new(matrix, threshold, pairs_observed), summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separable_sets_use_midpoint() {
        let threshold = choose_threshold(&[-2.0, -2.5], &[-4.0, -3.0]).unwrap();
        assert!((threshold - (-2.75)).abs() < 1e-12);
    }

    #[test]
    fn test_overlapping_sets_maximize_accuracy() {
        let good = [-1.0, -2.0, -3.5];
        let bad = [-5.0, -4.0, -3.0];
        let threshold = choose_threshold(&good, &bad).unwrap();
        // Best cuts misclassify one sample.
        assert_eq!(correct_at(threshold, &good, &bad), 5);
    }

    #[test]
    fn test_empty_sets_are_rejected() {
        assert!(choose_threshold(&[], &[-1.0]).is_err());
        assert!(choose_threshold(&[-1.0], &[]).is_err());
    }

    #[test]
    fn test_random_labels_are_reproducible() {
        let a = random_labels(20, 7);
        let b = random_labels(20, 7);
        assert_eq!(a, b);
        assert_ne!(a, random_labels(20, 8));
        for label in &a {
            assert!((RANDOM_MIN_LEN..=RANDOM_MAX_LEN).contains(&label.len()));
            assert!(label.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_trainer_separates_words_from_noise() {
        let corpus: Vec<String> = [
            "the history of the internet begins with the development of computers",
            "research into packet switching started in the united states",
            "the world wide web was invented by a british scientist working at cern",
            "search engines index pages and rank them by relevance",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let good = ["internet", "history", "search", "development", "scientist"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (model, summary) = ModelTrainer::new(corpus)
            .with_good(good)
            .with_bad(random_labels(200, DEFAULT_SEED))
            .train()
            .unwrap();

        assert_eq!(model.threshold(), summary.threshold);
        assert_eq!(summary.good_samples, 5);
        assert_eq!(summary.bad_samples, 200);
        assert!(summary.accuracy() > 0.9);
        assert!(model.score("internet") > model.score("zqxjkvbwpf"));
    }

    #[test]
    fn test_empty_corpus_fails() {
        let result = ModelTrainer::new(vec![String::new(), "a".to_string()])
            .with_bad(random_labels(10, 1))
            .train();
        assert!(matches!(result, Err(DetectorError::TrainingError { .. })));
    }
}
