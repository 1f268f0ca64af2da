use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 3.8;
pub const DEFAULT_CONSONANT_THRESHOLD: usize = 7;
pub const DEFAULT_LENGTH_THRESHOLD: usize = 12;

/// Cutoffs for the advisory lexical flags. A flag is set when the measured
/// value is strictly greater than its cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicThresholds {
    pub entropy: f64,
    pub consonants: usize,
    pub length: usize,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            entropy: DEFAULT_ENTROPY_THRESHOLD,
            consonants: DEFAULT_CONSONANT_THRESHOLD,
            length: DEFAULT_LENGTH_THRESHOLD,
        }
    }
}

/// Lexical measurements of a normalized label. Lives for one classification.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecord {
    pub label: String,
    pub entropy: f64,
    pub consonants: usize,
    pub length: usize,
}

/// Advisory lexical signals. Each carries the triggering value when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalFlags {
    pub high_entropy: Option<f64>,
    pub high_consonants: Option<usize>,
    pub long_domain: Option<usize>,
}

impl LexicalFlags {
    pub fn any(&self) -> bool {
        self.high_entropy.is_some() || self.high_consonants.is_some() || self.long_domain.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// The domain as given by the caller, before normalization.
    pub domain: String,
    pub record: DomainRecord,
    /// Average log transition probability of the label.
    pub score: f64,
    pub is_dga: bool,
    pub flags: LexicalFlags,
}

/// One row of the batch output artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub domain: String,
    pub is_dga: bool,
    pub high_consonants: Option<usize>,
    pub high_entropy: Option<f64>,
    pub long_domain: Option<usize>,
}

impl From<&Verdict> for VerdictRecord {
    fn from(verdict: &Verdict) -> Self {
        Self {
            domain: verdict.domain.clone(),
            is_dga: verdict.is_dga,
            high_consonants: verdict.flags.high_consonants,
            high_entropy: verdict.flags.high_entropy,
            long_domain: verdict.flags.long_domain,
        }
    }
}

/// Why a domain was excluded from scoring. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    Empty,
    AnonymityNetwork,
    IpAddress,
    Internationalized,
    TooShort,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Empty => "empty",
            SkipReason::AnonymityNetwork => "anonymity-network",
            SkipReason::IpAddress => "ip-address",
            SkipReason::Internationalized => "internationalized",
            SkipReason::TooShort => "too-short",
        }
    }

    /// Console message shown when a domain is skipped.
    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::Empty => "Empty domains is ignored...",
            SkipReason::AnonymityNetwork => "Tor domains is ignored...",
            SkipReason::IpAddress => "IP addresses is ignored...",
            SkipReason::Internationalized => "Localized domains is ignored...",
            SkipReason::TooShort => "Short domains is ignored...",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one domain through the detector.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Scored(Verdict),
    Skipped { domain: String, reason: SkipReason },
}

impl Outcome {
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Outcome::Scored(verdict) => Some(verdict),
            Outcome::Skipped { .. } => None,
        }
    }
}

/// Everything the transform stage of a batch run produced.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<VerdictRecord>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl BatchOutcome {
    pub fn dga_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_dga).count()
    }
}
