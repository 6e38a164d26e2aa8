//! The three stages of a filter run.
//!
//! - [`header`]: resolve the header line into column positions ([`resolve_header`])
//! - [`scan`]: stream data lines through the predicates ([`Scanner`], [`RowFilter`])
//! - [`writer`]: serialize the accepted records as CSV ([`write_result_set`])
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use std::path::PathBuf;
//!
//! use interaction_filter::observability::{RunContext, TracingObserver};
//! use interaction_filter::pipeline::PipelineConfig;
//! use interaction_filter::processing::RowFilter;
//!
//! # fn main() -> Result<(), interaction_filter::FilterError> {
//! let config = PipelineConfig::rnainter();
//! let input = "Interactor1.Symbol\tInteractor2.Symbol\tscore\textra\nX\tY\t0.9\tfoo\n";
//! let ctx = RunContext { pipeline: config.name.clone(), input: PathBuf::from("inline") };
//!
//! let (result_set, _stats) =
//!     RowFilter::open(Cursor::new(input), &config, ctx, &TracingObserver)?.collect_result_set()?;
//! assert_eq!(result_set.value(0, "score"), Some("0.9"));
//! # Ok(())
//! # }
//! ```

pub mod header;
pub mod scan;
pub mod writer;

pub use header::{ResolvedHeader, resolve_header};
pub use scan::{RowFilter, Scanner};
pub use writer::{WriteOutcome, write_result_set};
