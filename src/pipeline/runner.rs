//! Runs the pipeline over every configured dataset.

use tracing::{error, info, warn};

use super::enrichment::{EnrichmentPipeline, FileReport, PipelineError};
use crate::config::DatasetConfig;

/// What happened to one dataset.
#[derive(Debug)]
pub struct DatasetOutcome {
    pub name: String,
    pub result: Result<FileReport, PipelineError>,
}

/// Outcomes of a run, in dataset order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<DatasetOutcome>,
}

impl RunSummary {
    /// Datasets whose output was written.
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Datasets skipped because their input does not exist.
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Err(PipelineError::MissingInput(_))))
            .count()
    }

    /// Datasets that failed to load or write.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed() - self.skipped()
    }

    pub fn get(&self, name: &str) -> Option<&DatasetOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

/// Process each dataset in turn. A failure in one dataset is logged and
/// never stops the next one.
pub async fn run_datasets(pipeline: &EnrichmentPipeline, datasets: &[DatasetConfig]) -> RunSummary {
    let mut summary = RunSummary::default();

    for dataset in datasets {
        info!(
            dataset = %dataset.name,
            input = %dataset.input.display(),
            "Processing dataset"
        );

        let result = pipeline.process(&dataset.input, &dataset.output).await;
        match &result {
            Ok(report) => info!(
                dataset = %dataset.name,
                rows = report.rows_enriched,
                output = %dataset.output.display(),
                "Dataset enriched"
            ),
            Err(PipelineError::MissingInput(path)) => warn!(
                dataset = %dataset.name,
                "Input file {:?} not found; skipping dataset",
                path
            ),
            Err(e) => error!(dataset = %dataset.name, "Dataset failed: {}", e),
        }

        summary.outcomes.push(DatasetOutcome {
            name: dataset.name.clone(),
            result,
        });
    }

    summary
}
