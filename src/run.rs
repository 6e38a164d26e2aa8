//! One end-to-end run: resolve paths, scan the input, write the output.

use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;

use tracing::info;

use crate::error::{FilterError, FilterResult};
use crate::observability::{RunContext, ScanObserver, ScanStats};
use crate::pipeline::{PipelineConfig, ProjectLayout};
use crate::processing::{RowFilter, WriteOutcome, write_result_set};
use crate::types::ResultSet;

/// Outcome of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Accepted records were written to `path`.
    Written {
        path: PathBuf,
        records: usize,
        stats: ScanStats,
    },
    /// No row was accepted; no output file was produced.
    NoMatchingData { stats: ScanStats },
}

/// Scan `reader` with `config` and collect every accepted record.
pub fn filter_reader<R: Read>(
    reader: R,
    config: &PipelineConfig,
    ctx: RunContext,
    observer: &dyn ScanObserver,
) -> FilterResult<(ResultSet, ScanStats)> {
    RowFilter::open(reader, config, ctx, observer)?.collect_result_set()
}

/// Run `config` against the input under `layout`.
///
/// The processed directory is created before the input is opened. A header missing a required
/// column fails with [`FilterError::MissingColumns`] and leaves no output behind. Failures are
/// also reported to `observer`.
pub fn run_pipeline(
    config: &PipelineConfig,
    layout: &ProjectLayout,
    observer: &dyn ScanObserver,
) -> FilterResult<RunOutcome> {
    let ctx = RunContext {
        pipeline: config.name.clone(),
        input: layout.input_path(config),
    };

    let result = run_inner(config, layout, ctx.clone(), observer);
    if let Err(e) = &result {
        observer.on_failure(&ctx, e.severity(), e);
    }
    result
}

fn run_inner(
    config: &PipelineConfig,
    layout: &ProjectLayout,
    ctx: RunContext,
    observer: &dyn ScanObserver,
) -> FilterResult<RunOutcome> {
    let input = ctx.input.clone();
    let output_dir = layout.processed_dir();
    fs::create_dir_all(&output_dir)?;

    info!("Processing file: {}", input.display());
    info!("Output directory: {}", output_dir.display());

    let file = File::open(&input)?;
    let (result_set, stats) = filter_reader(file, config, ctx, observer)?;

    match write_result_set(&result_set, layout.output_path(config))? {
        WriteOutcome::Written { path, records } => {
            info!("Processing complete! Found {records} matching records.");
            info!("Results saved to: {}", path.display());
            info!("Columns in output: {}", config.output_columns.join(", "));
            Ok(RunOutcome::Written {
                path,
                records,
                stats,
            })
        }
        WriteOutcome::Empty => {
            info!("{}", config.empty_message);
            Ok(RunOutcome::NoMatchingData { stats })
        }
    }
}

impl RunOutcome {
    /// Scan counters of the run.
    pub fn stats(&self) -> ScanStats {
        match self {
            RunOutcome::Written { stats, .. } | RunOutcome::NoMatchingData { stats } => *stats,
        }
    }
}

/// Diagnostic lines for a missing-column failure of `config`, or `None` for any other error.
pub fn missing_column_diagnostic(config: &PipelineConfig, err: &FilterError) -> Option<Vec<String>> {
    let FilterError::MissingColumns {
        required, header, ..
    } = err
    else {
        return None;
    };

    let mut lines = vec![
        "Error: Required column names not found. Please check the file format.".to_string(),
        format!("Available columns: {header:?}"),
    ];
    if config.report_required_columns {
        lines.push(format!("Required columns: {required:?}"));
    }
    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(config: &PipelineConfig) -> FilterError {
        FilterError::MissingColumns {
            missing: vec!["score".to_string()],
            required: config.required_columns(),
            header: vec!["a".to_string()],
        }
    }

    #[test]
    fn npinter5_diagnostic_lists_only_available_columns() {
        let config = PipelineConfig::npinter5();
        let lines = missing_column_diagnostic(&config, &missing(&config)).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Available columns: [\"a\"]");
    }

    #[test]
    fn rnainter_diagnostic_adds_required_columns() {
        let config = PipelineConfig::rnainter();
        let lines = missing_column_diagnostic(&config, &missing(&config)).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "Required columns: [\"Interactor1.Symbol\", \"Interactor2.Symbol\", \"score\"]"
        );
    }

    #[test]
    fn other_errors_have_no_diagnostic() {
        let err = FilterError::from(std::io::Error::other("boom"));
        assert!(missing_column_diagnostic(&PipelineConfig::rnainter(), &err).is_none());
    }
}
