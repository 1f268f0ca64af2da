pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::batch_pipeline::BatchPipeline;
pub use config::{cli::LocalStorage, DetectorSettings};
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use crate::core::{detector::Detector, engine::BatchEngine, model::Model};
pub use domain::model::{Outcome, SkipReason, Verdict, VerdictRecord};
pub use utils::error::{DetectorError, Result};
