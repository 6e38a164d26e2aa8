//! Observer hooks for scan progress and run outcomes.
//!
//! The default [`TracingObserver`] forwards events to `tracing`. Callers that need
//! their own bookkeeping implement [`ScanObserver`] and can fan out with [`CompositeObserver`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::{FilterError, Severity};

/// A progress event is emitted every this many input data lines.
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// Context about one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Pipeline name.
    pub pipeline: String,
    /// Input path being scanned.
    pub input: PathBuf,
}

/// Diagnostic counters for one scan. They never influence what is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Data lines read (header excluded).
    pub lines_read: u64,
    /// Lines dropped because their field count differed from the header.
    pub malformed_dropped: u64,
    /// Well-formed lines rejected by a predicate.
    pub predicate_rejected: u64,
    /// Lines accepted into the result set.
    pub accepted: u64,
}

/// Observer interface for scan progress and run outcomes.
pub trait ScanObserver: Send + Sync {
    /// Called every [`PROGRESS_INTERVAL`] data lines with the running line count.
    fn on_progress(&self, _ctx: &RunContext, _lines: u64) {}

    /// Called once the input is exhausted.
    fn on_finished(&self, _ctx: &RunContext, _stats: ScanStats) {}

    /// Called when the run fails.
    fn on_failure(&self, _ctx: &RunContext, _severity: Severity, _error: &FilterError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ScanObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ScanObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ScanObserver for CompositeObserver {
    fn on_progress(&self, ctx: &RunContext, lines: u64) {
        for o in &self.observers {
            o.on_progress(ctx, lines);
        }
    }

    fn on_finished(&self, ctx: &RunContext, stats: ScanStats) {
        for o in &self.observers {
            o.on_finished(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }
}

/// Logs events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn on_progress(&self, ctx: &RunContext, lines: u64) {
        info!(pipeline = %ctx.pipeline, "Processed {lines} lines...");
    }

    fn on_finished(&self, ctx: &RunContext, stats: ScanStats) {
        debug!(
            pipeline = %ctx.pipeline,
            lines_read = stats.lines_read,
            malformed_dropped = stats.malformed_dropped,
            predicate_rejected = stats.predicate_rejected,
            accepted = stats.accepted,
            "scan finished"
        );
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &FilterError) {
        match severity {
            Severity::Error => warn!(
                pipeline = %ctx.pipeline,
                input = %ctx.input.display(),
                "run stopped: {error}"
            ),
            Severity::Critical => error!(
                pipeline = %ctx.pipeline,
                input = %ctx.input.display(),
                "run failed: {error}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Counting {
        progress: Mutex<Vec<u64>>,
        finished: Mutex<Vec<ScanStats>>,
    }

    impl ScanObserver for Counting {
        fn on_progress(&self, _ctx: &RunContext, lines: u64) {
            self.progress.lock().unwrap().push(lines);
        }

        fn on_finished(&self, _ctx: &RunContext, stats: ScanStats) {
            self.finished.lock().unwrap().push(stats);
        }
    }

    #[test]
    fn composite_fans_out_to_every_observer() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let observers: Vec<Arc<dyn ScanObserver>> = vec![
            a.clone() as Arc<dyn ScanObserver>,
            b.clone(),
            Arc::new(TracingObserver),
        ];
        let composite = CompositeObserver::new(observers);
        let ctx = RunContext {
            pipeline: "test".to_string(),
            input: PathBuf::from("in.txt"),
        };

        composite.on_progress(&ctx, PROGRESS_INTERVAL);
        composite.on_finished(&ctx, ScanStats { lines_read: 3, ..Default::default() });

        for o in [&a, &b] {
            assert_eq!(*o.progress.lock().unwrap(), vec![PROGRESS_INTERVAL]);
            assert_eq!(o.finished.lock().unwrap()[0].lines_read, 3);
        }
        assert!(format!("{composite:?}").contains("observers_len: 3"));
    }
}
