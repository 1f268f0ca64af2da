use crate::core::alphabet::{self, ALPHABET_SIZE};

/// Added to every pair count before normalization.
pub const SMOOTHING: f64 = 1.0;

/// Score of a label with no adjacent pairs. The maximum possible average,
/// so such labels are never flagged.
pub const NO_PAIRS_SCORE: f64 = 0.0;

/// Raw pair counts gathered from a training corpus.
#[derive(Debug, Clone)]
pub struct TransitionCounts {
    counts: Vec<f64>,
    observed: u64,
}

impl Default for TransitionCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionCounts {
    pub fn new() -> Self {
        Self {
            counts: vec![SMOOTHING; ALPHABET_SIZE * ALPHABET_SIZE],
            observed: 0,
        }
    }

    /// Counts every adjacent character pair in `text`.
    pub fn observe(&mut self, text: &str) {
        for (prev, next) in alphabet::pairs(text) {
            self.counts[prev * ALPHABET_SIZE + next] += 1.0;
            self.observed += 1;
        }
    }

    /// Number of pairs counted so far, smoothing excluded.
    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// Normalizes each row to a distribution and moves it to log space.
    pub fn into_matrix(self) -> TransitionMatrix {
        let mut cells = self.counts;
        for row in cells.chunks_mut(ALPHABET_SIZE) {
            let total: f64 = row.iter().sum();
            for cell in row.iter_mut() {
                *cell = (*cell / total).ln();
            }
        }
        TransitionMatrix { cells }
    }
}

/// Log-probability of `next` following `prev`, for every pair of alphabet
/// indices. Rows are distributions in probability space.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    cells: Vec<f64>,
}

impl TransitionMatrix {
    /// Trains a matrix from corpus lines.
    pub fn train<I, S>(corpus: I) -> (Self, u64)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = TransitionCounts::new();
        for line in corpus {
            counts.observe(line.as_ref());
        }
        let observed = counts.observed();
        (counts.into_matrix(), observed)
    }

    /// Wraps already-computed log cells. Length must be `ALPHABET_SIZE²`.
    pub fn from_log_cells(cells: Vec<f64>) -> Option<Self> {
        (cells.len() == ALPHABET_SIZE * ALPHABET_SIZE).then_some(Self { cells })
    }

    pub fn get(&self, prev: usize, next: usize) -> f64 {
        self.cells[prev * ALPHABET_SIZE + next]
    }

    pub fn row(&self, prev: usize) -> &[f64] {
        &self.cells[prev * ALPHABET_SIZE..(prev + 1) * ALPHABET_SIZE]
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn dimension(&self) -> usize {
        ALPHABET_SIZE
    }

    /// Average log transition probability across the label's adjacent pairs.
    pub fn average_log_prob(&self, label: &str) -> f64 {
        let mut total = 0.0;
        let mut pairs = 0usize;
        for (prev, next) in alphabet::pairs(label) {
            total += self.get(prev, next);
            pairs += 1;
        }
        if pairs == 0 {
            return NO_PAIRS_SCORE;
        }
        total / pairs as f64
    }
}
