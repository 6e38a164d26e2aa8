//! `interaction-filter` turns large tab-separated interaction dumps into small CSV files.
//!
//! Each run reads one TSV input, resolves the columns it needs from the header line, keeps the
//! rows that pass a fixed set of case-insensitive equality predicates, projects a fixed list of
//! output columns and writes the result as CSV.
//!
//! Two pipelines are built in (see [`pipeline::PipelineConfig`]):
//!
//! - **npinter5**: keeps `class == binding AND level == rna-protein` and outputs
//!   `ncName, ncID, tarName, tarID, tag, class`
//! - **rnainter**: keeps every well-formed row and outputs
//!   `Interactor1.Symbol, Interactor2.Symbol, score`
//!
//! ## Behavior worth knowing
//!
//! - A header that lacks a required column stops the run before any data row is read
//!   ([`FilterError::MissingColumns`]).
//! - Rows whose field count differs from the header are dropped silently
//!   (they only show up in [`observability::ScanStats`]).
//! - An empty result writes no file at all ([`run::RunOutcome::NoMatchingData`]).
//! - Accepted records are buffered in memory until the scan completes.
//!
//! ## Example
//!
//! ```no_run
//! use interaction_filter::observability::TracingObserver;
//! use interaction_filter::pipeline::{PipelineConfig, ProjectLayout};
//! use interaction_filter::run::{run_pipeline, RunOutcome};
//!
//! # fn main() -> Result<(), interaction_filter::FilterError> {
//! let layout = ProjectLayout::new(".");
//! match run_pipeline(&PipelineConfig::npinter5(), &layout, &TracingObserver)? {
//!     RunOutcome::Written { path, records, .. } => println!("{records} rows -> {}", path.display()),
//!     RunOutcome::NoMatchingData { .. } => println!("nothing matched"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: header, column index, predicates and result records
//! - [`pipeline`]: the built-in pipelines and the project directory layout
//! - [`processing`]: header resolution, streaming scan, CSV writer
//! - [`run`]: end-to-end orchestration
//! - [`observability`]: progress and outcome hooks
//! - [`error`]: the shared error type

pub mod error;
pub mod observability;
pub mod pipeline;
pub mod processing;
pub mod run;
pub mod types;

pub use error::{FilterError, FilterResult, Severity};
