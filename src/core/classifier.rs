use crate::core::model::Model;
use crate::domain::model::{DomainRecord, HeuristicThresholds, LexicalFlags, Verdict};

/// Turns lexical features and a transition score into a verdict.
///
/// The lexical flags are advisory only: `is_dga` depends on the transition
/// score alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    thresholds: HeuristicThresholds,
}

impl Classifier {
    pub fn new(thresholds: HeuristicThresholds) -> Self {
        Self { thresholds }
    }

    pub fn flags(&self, record: &DomainRecord) -> LexicalFlags {
        LexicalFlags {
            high_entropy: (record.entropy > self.thresholds.entropy).then_some(record.entropy),
            high_consonants: (record.consonants > self.thresholds.consonants)
                .then_some(record.consonants),
            long_domain: (record.length > self.thresholds.length).then_some(record.length),
        }
    }

    pub fn classify(&self, domain: &str, record: DomainRecord, model: &Model) -> Verdict {
        let score = model.score(&record.label);
        let is_dga = model.is_dga_score(score);
        let flags = self.flags(&record);
        tracing::debug!(
            "{} -> label={} score={:.4} threshold={:.4} is_dga={}",
            domain,
            record.label,
            score,
            model.threshold(),
            is_dga
        );
        Verdict {
            domain: domain.to_string(),
            record,
            score,
            is_dga,
            flags,
        }
    }
}
