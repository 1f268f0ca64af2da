pub mod batch_pipeline;
pub mod report;
