//! Streaming row filter.
//!
//! [`Scanner`] is a two-state machine: it starts in `AwaitingHeader`, moves to `Streaming` once
//! the first line resolves as a header, and then turns each data line into zero or one
//! [`OutputRecord`]. [`RowFilter`] drives a scanner over the records of a tab-separated
//! [`csv::Reader`] as a lazy, single-pass iterator.
//!
//! Every line is stripped of surrounding whitespace before its fields are counted, so a line
//! ending in a tab loses its empty last field. Completely empty lines are skipped by the reader:
//! they are neither counted nor considered rows.

use std::io::{BufRead, BufReader, Read};

use csv::{StringRecord, StringRecordsIntoIter};

use crate::error::FilterResult;
use crate::observability::{PROGRESS_INTERVAL, RunContext, ScanObserver, ScanStats};
use crate::pipeline::PipelineConfig;
use crate::types::{OutputRecord, ResultSet, trimmed_fields, tsv_reader};

use super::header::{ResolvedHeader, resolve_header};

#[derive(Debug)]
enum ScanState {
    AwaitingHeader,
    Streaming(ResolvedHeader),
}

/// Record-at-a-time filter for one pipeline.
#[derive(Debug)]
pub struct Scanner<'a> {
    config: &'a PipelineConfig,
    state: ScanState,
    stats: ScanStats,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            state: ScanState::AwaitingHeader,
            stats: ScanStats::default(),
        }
    }

    /// Feed one input record, trimming the line it came from first.
    pub fn feed_record(&mut self, record: &StringRecord) -> FilterResult<Option<OutputRecord>> {
        self.feed_fields(&trimmed_fields(record))
    }

    /// Feed the fields of one trimmed line.
    ///
    /// The first line is resolved as the header and never yields a record. Data lines whose
    /// field count differs from the header, or that fail a predicate, yield `None`.
    pub fn feed_fields(&mut self, fields: &[&str]) -> FilterResult<Option<OutputRecord>> {
        if let ScanState::AwaitingHeader = self.state {
            self.state = ScanState::Streaming(resolve_header(fields, self.config)?);
            return Ok(None);
        }

        let ScanState::Streaming(resolved) = &self.state else {
            return Ok(None);
        };
        self.stats.lines_read += 1;

        if fields.len() != resolved.width() {
            self.stats.malformed_dropped += 1;
            return Ok(None);
        }
        if !resolved.accepts(fields) {
            self.stats.predicate_rejected += 1;
            return Ok(None);
        }

        self.stats.accepted += 1;
        Ok(Some(resolved.project(fields)))
    }

    /// Returns `true` once the header has been resolved.
    pub fn is_streaming(&self) -> bool {
        matches!(self.state, ScanState::Streaming(_))
    }

    /// Counters so far.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Signal end of input.
    ///
    /// Input without any line is treated as an empty header line, so header resolution still
    /// runs and reports the missing columns.
    pub fn finish(&mut self) -> FilterResult<ScanStats> {
        if !self.is_streaming() {
            self.feed_fields(&[""])?;
        }
        Ok(self.stats)
    }
}

/// Lazy iterator of accepted records over a tab-separated source.
pub struct RowFilter<'a, R> {
    records: StringRecordsIntoIter<BufReader<R>>,
    scanner: Scanner<'a>,
    ctx: RunContext,
    observer: &'a dyn ScanObserver,
    done: bool,
}

impl<'a, R: Read> RowFilter<'a, R> {
    /// Read and resolve the header, returning a filter positioned at the first data line.
    pub fn open(
        reader: R,
        config: &'a PipelineConfig,
        ctx: RunContext,
        observer: &'a dyn ScanObserver,
    ) -> FilterResult<Self> {
        let mut reader = BufReader::new(reader);
        // The csv reader skips empty lines; an empty first line must still be the header.
        let blank_first_line = matches!(reader.fill_buf()?.first(), Some(b'\n' | b'\r'));

        let mut scanner = Scanner::new(config);
        let mut records = tsv_reader(reader).into_records();
        if blank_first_line {
            scanner.feed_fields(&[""])?;
        } else {
            match records.next() {
                Some(record) => {
                    scanner.feed_record(&record?)?;
                }
                None => {
                    scanner.finish()?;
                }
            }
        }

        Ok(Self {
            records,
            scanner,
            ctx,
            observer,
            done: false,
        })
    }

    /// Counters so far.
    pub fn stats(&self) -> ScanStats {
        self.scanner.stats()
    }

    /// Drain the remaining input into a [`ResultSet`].
    pub fn collect_result_set(mut self) -> FilterResult<(ResultSet, ScanStats)> {
        let mut result_set = ResultSet::new(self.scanner.config.output_columns.clone());
        for record in &mut self {
            result_set.push(record?);
        }
        Ok((result_set, self.stats()))
    }
}

impl<R: Read> Iterator for RowFilter<'_, R> {
    type Item = FilterResult<OutputRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.records.next() {
                None => {
                    self.done = true;
                    self.observer.on_finished(&self.ctx, self.scanner.stats());
                }
                Some(Ok(record)) => {
                    let outcome = self.scanner.feed_record(&record);
                    let lines = self.scanner.stats().lines_read;
                    if lines % PROGRESS_INTERVAL == 0 {
                        self.observer.on_progress(&self.ctx, lines);
                    }
                    match outcome {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => {}
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}
