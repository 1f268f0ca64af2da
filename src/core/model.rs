use crate::core::alphabet::{ALPHABET_SIZE, LETTERS};
use crate::core::transition::TransitionMatrix;
use crate::utils::error::{DetectorError, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

pub const MODEL_MAGIC: &[u8; 4] = b"DGAM";
pub const MODEL_FORMAT_VERSION: u16 = 1;
pub const DEFAULT_MODEL_PATH: &str = "model/dga_model.bin";

/// Fixed-size part of the artifact, before the alphabet letters.
pub const HEADER_SIZE: usize = 32;

const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Trained transition matrix plus the decision threshold. Immutable once
/// built or loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    matrix: TransitionMatrix,
    threshold: f64,
    trained_at: DateTime<Utc>,
    pairs_observed: u64,
}

impl Model {
    pub fn new(matrix: TransitionMatrix, threshold: f64, pairs_observed: u64) -> Self {
        Self::with_timestamp(matrix, threshold, pairs_observed, Utc::now())
    }

    pub fn with_timestamp(
        matrix: TransitionMatrix,
        threshold: f64,
        pairs_observed: u64,
        trained_at: DateTime<Utc>,
    ) -> Self {
        // Sub-second precision does not survive the artifact.
        let trained_at = DateTime::from_timestamp(trained_at.timestamp(), 0).unwrap_or(trained_at);
        Self {
            matrix,
            threshold,
            trained_at,
            pairs_observed,
        }
    }

    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn pairs_observed(&self) -> u64 {
        self.pairs_observed
    }

    /// Average log transition probability of `label`.
    pub fn score(&self, label: &str) -> f64 {
        self.matrix.average_log_prob(label)
    }

    /// Scores at or below the threshold are DGA.
    pub fn is_dga_score(&self, score: f64) -> bool {
        !(score > self.threshold)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let cells = self.matrix.cells();
        let mut out = Vec::with_capacity(HEADER_SIZE + LETTERS.len() + cells.len() * 8);
        out.extend_from_slice(MODEL_MAGIC);
        out.extend_from_slice(&MODEL_FORMAT_VERSION.to_le_bytes());
        out.extend_from_slice(&(ALPHABET_SIZE as u16).to_le_bytes());
        out.extend_from_slice(&self.threshold.to_le_bytes());
        out.extend_from_slice(&self.trained_at.timestamp().to_le_bytes());
        out.extend_from_slice(&self.pairs_observed.to_le_bytes());
        out.extend_from_slice(LETTERS.as_bytes());
        for cell in cells {
            out.extend_from_slice(&cell.to_le_bytes());
        }
        out
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        if raw.len() < HEADER_SIZE {
            return Err(DetectorError::model_format(format!(
                "artifact shorter than header: got {} bytes, need at least {}",
                raw.len(),
                HEADER_SIZE
            )));
        }
        if &raw[0..4] != MODEL_MAGIC {
            return Err(DetectorError::model_format("bad magic, not a DGA model artifact"));
        }

        let version = read_u16_le(raw, 4)?;
        if version != MODEL_FORMAT_VERSION {
            return Err(DetectorError::model_format(format!(
                "unsupported format version {} (expected {})",
                version, MODEL_FORMAT_VERSION
            )));
        }

        let alphabet_size = read_u16_le(raw, 6)? as usize;
        if alphabet_size != ALPHABET_SIZE {
            return Err(DetectorError::model_format(format!(
                "alphabet size {} does not match {}",
                alphabet_size, ALPHABET_SIZE
            )));
        }

        let threshold = f64::from_bits(read_u64_le(raw, 8)?);
        if !threshold.is_finite() {
            return Err(DetectorError::model_format(format!(
                "threshold is not finite: {}",
                threshold
            )));
        }

        let timestamp = read_u64_le(raw, 16)? as i64;
        let trained_at = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
            DetectorError::model_format(format!("invalid training timestamp {}", timestamp))
        })?;
        let pairs_observed = read_u64_le(raw, 24)?;

        let letters_end = HEADER_SIZE + LETTERS.len();
        let expected_len = letters_end + ALPHABET_SIZE * ALPHABET_SIZE * 8;
        if raw.len() != expected_len {
            return Err(DetectorError::model_format(format!(
                "artifact is {} bytes, expected {}",
                raw.len(),
                expected_len
            )));
        }
        if &raw[HEADER_SIZE..letters_end] != LETTERS.as_bytes() {
            return Err(DetectorError::model_format("alphabet letters do not match"));
        }

        let mut cells = Vec::with_capacity(ALPHABET_SIZE * ALPHABET_SIZE);
        for (index, offset) in (letters_end..raw.len()).step_by(8).enumerate() {
            let cell = f64::from_bits(read_u64_le(raw, offset)?);
            if !cell.is_finite() {
                return Err(DetectorError::model_format(format!(
                    "cell {} is not finite: {}",
                    index, cell
                )));
            }
            cells.push(cell);
        }

        let matrix = TransitionMatrix::from_log_cells(cells)
            .ok_or_else(|| DetectorError::model_format("matrix has the wrong number of cells"))?;
        validate_rows(&matrix)?;

        Ok(Self {
            matrix,
            threshold,
            trained_at,
            pairs_observed,
        })
    }

    /// Loads and validates the artifact at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DetectorError::ModelNotFound {
                path: path.display().to_string(),
            },
            _ => DetectorError::IoError(e),
        })?;
        let model = Self::from_bytes(&raw)?;
        tracing::debug!(
            "Loaded model from {} (threshold {:.6}, trained {})",
            path.display(),
            model.threshold,
            model.trained_at
        );
        Ok(model)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

fn validate_rows(matrix: &TransitionMatrix) -> Result<()> {
    for prev in 0..matrix.dimension() {
        let sum: f64 = matrix.row(prev).iter().map(|cell| cell.exp()).sum();
        if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
            return Err(DetectorError::model_format(format!(
                "row {} is not a distribution (sums to {})",
                prev, sum
            )));
        }
    }
    Ok(())
}

fn read_u16_le(raw: &[u8], offset: usize) -> Result<u16> {
    let end = offset.saturating_add(2);
    let bytes = raw.get(offset..end).ok_or_else(|| {
        DetectorError::model_format(format!("u16 out of bounds at offset {}", offset))
    })?;
    let mut out = [0u8; 2];
    out.copy_from_slice(bytes);
    Ok(u16::from_le_bytes(out))
}

fn read_u64_le(raw: &[u8], offset: usize) -> Result<u64> {
    let end = offset.saturating_add(8);
    let bytes = raw.get(offset..end).ok_or_else(|| {
        DetectorError::model_format(format!("u64 out of bounds at offset {}", offset))
    })?;
    let mut out = [0u8; 8];
    out.copy_from_slice(bytes);
    Ok(u64::from_le_bytes(out))
}
