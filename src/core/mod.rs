pub mod alphabet;
pub mod classifier;
pub mod detector;
pub mod engine;
pub mod features;
pub mod model;
pub mod normalizer;
pub mod training;
pub mod transition;

pub use crate::domain::model::{BatchOutcome, Outcome, Verdict};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
