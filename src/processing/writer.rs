//! CSV output for a finished [`ResultSet`].
//!
//! Output is written to a temporary file next to the destination and moved into place once
//! complete, so an interrupted write never leaves a truncated CSV behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{FilterError, FilterResult};
use crate::types::ResultSet;

/// What [`write_result_set`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The CSV was written to `path`.
    Written { path: PathBuf, records: usize },
    /// The result set was empty; nothing was written.
    Empty,
}

/// Serialize `result_set` as comma-separated values to `path`.
///
/// The first line holds the output-column names; each record follows in order. An empty result
/// set writes nothing, not even a header-only file. The parent directory is created if absent.
pub fn write_result_set(result_set: &ResultSet, path: impl AsRef<Path>) -> FilterResult<WriteOutcome> {
    if result_set.is_empty() {
        return Ok(WriteOutcome::Empty);
    }

    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp = output_temp_file(parent)?;
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(temp);

    wtr.write_record(&result_set.columns)?;
    for record in &result_set.records {
        wtr.write_record(&record.values)?;
    }

    let temp = wtr
        .into_inner()
        .map_err(|e| FilterError::Io(io::Error::new(e.error().kind(), e.error().to_string())))?;
    temp.persist(path).map_err(|e| FilterError::Persist {
        path: path.to_path_buf(),
        message: e.error.to_string(),
    })?;

    debug!(path = %path.display(), records = result_set.len(), "csv persisted");
    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
        records: result_set.len(),
    })
}

/// Temp file for the output, created with the mode a plain `File::create` would get.
fn output_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".").suffix(".csv.tmp");
    // tempfile defaults to 0o600; 0o666 is filtered by the process umask like any new file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}
