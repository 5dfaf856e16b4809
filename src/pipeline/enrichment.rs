//! Bulk enrichment of one table.
//!
//! [`EnrichmentPipeline::process`] walks a file through
//! `Loaded -> Filtered -> SchemaAugmented -> RowEnriched* -> Persisted`.
//! A missing input, an unreadable input and a failed write each end the file
//! with a [`PipelineError`]; nothing that happens to a single row does.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use reelgraft_common::EnrichedRecord;
use tracing::{debug, info};

use crate::metadata::{LookupOutcome, LookupReport, MetadataClient, RequestThrottle};
use crate::table::{read_table, write_table, TableError};

/// Progress callback type, called with `(done, total)` after every row
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

const PROGRESS_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// Why a file was not enriched.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input file not found: {0:?}")]
    MissingInput(PathBuf),

    #[error("Failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}

/// Counters for one processed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Data rows in the input, before filtering.
    pub rows_read: usize,
    /// Rows discarded for a missing title or year.
    pub rows_dropped: usize,
    /// Rows written to the output.
    pub rows_enriched: usize,
    pub matched: usize,
    pub not_found: usize,
    pub search_failed: usize,
    /// Matched rows where credits or details could not be fetched.
    pub partial: usize,
}

impl FileReport {
    fn tally(&mut self, lookup: &LookupReport) {
        self.rows_enriched += 1;
        match lookup.outcome {
            LookupOutcome::Matched { .. } => self.matched += 1,
            LookupOutcome::NotFound => self.not_found += 1,
            LookupOutcome::SearchFailed => self.search_failed += 1,
        }
        if lookup.is_partial() {
            self.partial += 1;
        }
    }
}

/// Enriches one input table into one output table, a row at a time.
pub struct EnrichmentPipeline {
    client: MetadataClient,
    throttle: RequestThrottle,
    show_progress: bool,
    progress_callback: Option<ProgressCallback>,
}

impl EnrichmentPipeline {
    pub fn new(client: MetadataClient, throttle: RequestThrottle) -> Self {
        Self {
            client,
            throttle,
            show_progress: false,
            progress_callback: None,
        }
    }

    /// Draw a progress bar on stderr while rows are enriched.
    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Enrich `input` and write the result to `output`.
    ///
    /// The throttle pauses after every row's lookup, whether it succeeded or
    /// not. The output is written once, after the last row.
    pub async fn process(&self, input: &Path, output: &Path) -> Result<FileReport, PipelineError> {
        let table = read_table(input).map_err(|source| match source {
            TableError::NotFound(path) => PipelineError::MissingInput(path),
            source => PipelineError::Load {
                path: input.to_path_buf(),
                source,
            },
        })?;

        let total = table.len();
        info!(
            path = %input.display(),
            rows = total,
            dropped = table.dropped,
            provider = self.client.provider_name(),
            "Loaded input table"
        );

        let columns = table.source_columns();
        let mut report = FileReport {
            rows_read: total + table.dropped,
            rows_dropped: table.dropped,
            ..Default::default()
        };

        let bar = self.progress_bar(total, input);
        let mut rows = Vec::with_capacity(total);

        for (i, record) in table.records.into_iter().enumerate() {
            let lookup = self
                .client
                .lookup_with_report(&record.title, &record.year)
                .await;
            report.tally(&lookup);
            rows.push(EnrichedRecord::new(record, lookup.fields));

            self.report_progress(i + 1, total, &bar);
            self.throttle.pause().await;
        }
        bar.finish_and_clear();

        write_table(output, &table.headers, &columns, &rows).map_err(|source| {
            PipelineError::Write {
                path: output.to_path_buf(),
                source,
            }
        })?;

        info!(
            input = %input.display(),
            output = %output.display(),
            rows = report.rows_enriched,
            matched = report.matched,
            not_found = report.not_found,
            failed = report.search_failed,
            partial = report.partial,
            "Wrote enriched table"
        );

        Ok(report)
    }

    fn progress_bar(&self, total: usize, input: &Path) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.set_message(format!("Enriching {}", input.display()));
        bar
    }

    fn report_progress(&self, done: usize, total: usize, bar: &ProgressBar) {
        bar.inc(1);
        if let Some(ref cb) = self.progress_callback {
            cb(done, total);
        }
        debug!("[{}/{}] rows enriched", done, total);
    }
}
