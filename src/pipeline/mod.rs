pub mod enrichment;
pub mod runner;

pub use enrichment::{EnrichmentPipeline, FileReport, PipelineError, ProgressCallback};
pub use runner::{run_datasets, DatasetOutcome, RunSummary};
