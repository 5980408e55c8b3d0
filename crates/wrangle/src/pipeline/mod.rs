//! Declarative cleaning pipelines.

mod config;
mod engine;
mod operations;

pub use config::PipelineConfig;
pub use engine::CleaningPipeline;
pub use operations::{CleaningReport, CleaningStep, RowAudit, StepChange};
