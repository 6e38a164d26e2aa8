use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for filtering operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Error type returned by the header resolver, the scanner and the writer.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Underlying I/O error (e.g. input file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error while reading the input or writing the result set.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input header lacks one or more columns required by the pipeline.
    ///
    /// This is the only hard stop of a run: it is raised before any data row is processed.
    #[error("missing required columns {missing:?}. required={required:?} header={header:?}")]
    MissingColumns {
        missing: Vec<String>,
        required: Vec<String>,
        header: Vec<String>,
    },

    /// The finished output could not be moved into place.
    #[error("failed to persist output to {}: {message}", path.display())]
    Persist { path: PathBuf, message: String },
}

/// Severity classification reported to observers alongside a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Configuration / input-shape problem; the run stopped cleanly.
    Error,
    /// Infrastructure failure (I/O, persistence).
    Critical,
}

impl FilterError {
    /// Classify this error for observers.
    pub fn severity(&self) -> Severity {
        match self {
            FilterError::MissingColumns { .. } => Severity::Error,
            FilterError::Csv(e) if !matches!(e.kind(), csv::ErrorKind::Io(_)) => Severity::Error,
            FilterError::Io(_) | FilterError::Csv(_) | FilterError::Persist { .. } => {
                Severity::Critical
            }
        }
    }

    /// Returns `true` for the missing-column configuration error.
    pub fn is_missing_columns(&self) -> bool {
        matches!(self, FilterError::MissingColumns { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_header() {
        let err = FilterError::MissingColumns {
            missing: vec!["level".to_string()],
            required: vec!["class".to_string(), "level".to_string()],
            header: vec!["class".to_string(), "tag".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("missing required columns [\"level\"]"));
        assert!(msg.contains("header=[\"class\", \"tag\"]"));
        assert_eq!(err.severity(), Severity::Error);
        assert!(err.is_missing_columns());
    }

    #[test]
    fn io_errors_are_critical() {
        let err = FilterError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.severity(), Severity::Critical);
        assert!(!err.is_missing_columns());
    }
}
