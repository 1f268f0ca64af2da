use crate::core::Pipeline;
use crate::domain::model::BatchOutcome;
use crate::utils::error::Result;

/// What a finished batch run produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub output_path: String,
    pub processed: usize,
    pub skipped: usize,
    pub flagged: usize,
}

impl BatchReport {
    fn new(output_path: String, outcome: &BatchOutcome) -> Self {
        Self {
            output_path,
            processed: outcome.records.len(),
            skipped: outcome.skipped.len(),
            flagged: outcome.dga_count(),
        }
    }
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<BatchReport> {
        tracing::info!("Starting batch classification");

        let domains = self.pipeline.extract()?;
        tracing::info!("Read {} domains", domains.len());

        let outcome = self.pipeline.transform(domains)?;
        tracing::info!(
            "Classified {} domains ({} skipped, {} flagged as DGA)",
            outcome.records.len(),
            outcome.skipped.len(),
            outcome.dga_count()
        );

        let output_path = self.pipeline.load(&outcome)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(BatchReport::new(output_path, &outcome))
    }
}
