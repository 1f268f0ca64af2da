use crate::domain::model::{BatchOutcome, HeuristicThresholds};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn heuristics(&self) -> HeuristicThresholds;
    fn min_label_length(&self) -> usize;
    fn parallel(&self) -> bool;
}

/// A batch run: pull domains in, classify them, write the results out.
pub trait Pipeline: Send + Sync {
    fn extract(&self) -> Result<Vec<String>>;
    fn transform(&self, domains: Vec<String>) -> Result<BatchOutcome>;
    fn load(&self, outcome: &BatchOutcome) -> Result<String>;
}
