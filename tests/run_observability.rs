use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Mutex;

use interaction_filter::observability::{PROGRESS_INTERVAL, RunContext, ScanObserver, ScanStats};
use interaction_filter::pipeline::{PipelineConfig, ProjectLayout};
use interaction_filter::run::{filter_reader, run_pipeline};
use interaction_filter::{FilterError, Severity};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingObserver {
    progress: Mutex<Vec<u64>>,
    finished: Mutex<Vec<ScanStats>>,
    failures: Mutex<Vec<Severity>>,
}

impl ScanObserver for RecordingObserver {
    fn on_progress(&self, _ctx: &RunContext, lines: u64) {
        self.progress.lock().unwrap().push(lines);
    }

    fn on_finished(&self, _ctx: &RunContext, stats: ScanStats) {
        self.finished.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &RunContext, severity: Severity, _error: &FilterError) {
        self.failures.lock().unwrap().push(severity);
    }
}

#[test]
fn progress_counts_input_lines_not_accepted_records() {
    let config = PipelineConfig::npinter5();
    let mut input = String::from("ncName\tncID\ttarName\ttarID\ttag\tclass\tlevel\n");
    for i in 0..250_000u64 {
        // One in a thousand rows matches; every 7th row is malformed.
        if i % 7 == 0 {
            input.push_str("short\trow\n");
        } else if i % 1000 == 1 {
            input.push_str("a\tb\tc\td\te\tbinding\tRNA-Protein\n");
        } else {
            input.push_str("a\tb\tc\td\te\texpression\tRNA-Protein\n");
        }
    }

    let obs = RecordingObserver::default();
    let ctx = RunContext {
        pipeline: config.name.clone(),
        input: PathBuf::from("generated"),
    };
    let (rs, stats) = filter_reader(Cursor::new(input), &config, ctx, &obs).unwrap();

    assert_eq!(*obs.progress.lock().unwrap(), vec![PROGRESS_INTERVAL, 2 * PROGRESS_INTERVAL]);
    assert_eq!(*obs.finished.lock().unwrap(), vec![stats]);
    assert_eq!(stats.lines_read, 250_000);
    assert_eq!(
        stats.malformed_dropped + stats.predicate_rejected + stats.accepted,
        stats.lines_read
    );
    assert_eq!(rs.len() as u64, stats.accepted);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn missing_columns_are_reported_as_error_severity() {
    let dir = TempDir::new().unwrap();
    let layout = ProjectLayout::new(dir.path());
    let config = PipelineConfig::rnainter();
    fs::create_dir_all(layout.raw_dir()).unwrap();
    fs::write(layout.input_path(&config), "Interactor1.Symbol\tscore\nX\t1\n").unwrap();

    let obs = RecordingObserver::default();
    let err = run_pipeline(&config, &layout, &obs).unwrap_err();

    assert!(err.is_missing_columns());
    assert_eq!(*obs.failures.lock().unwrap(), vec![Severity::Error]);
    assert!(obs.finished.lock().unwrap().is_empty());
}

#[test]
fn missing_input_is_reported_as_critical() {
    let dir = TempDir::new().unwrap();
    let layout = ProjectLayout::new(dir.path());

    let obs = RecordingObserver::default();
    let _ = run_pipeline(&PipelineConfig::npinter5(), &layout, &obs).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![Severity::Critical]);
}
