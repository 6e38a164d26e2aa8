//! Core data model for a filter run.
//!
//! A run reads a tab-separated [`Header`], resolves a [`ColumnIndex`], applies [`Predicate`]s to
//! each row and collects accepted [`OutputRecord`]s into a [`ResultSet`].

use std::collections::HashMap;
use std::io;

use csv::StringRecord;

/// Field separator of the input files.
pub const INPUT_DELIMITER: u8 = b'\t';

/// Build the reader used for every input file.
///
/// Input is plain tab-separated text: no quoting, and rows may have any number of fields (width
/// is checked against the header by the scanner, not by the parser).
pub fn tsv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(INPUT_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
}

/// Fields of one input line after whitespace is stripped from both ends of the line.
///
/// Whitespace-only fields at either end disappear with the stripping, exactly as if the raw line
/// were trimmed before splitting. A line that is entirely whitespace yields a single empty field.
pub fn trimmed_fields(record: &StringRecord) -> Vec<&str> {
    let fields: Vec<&str> = record.iter().collect();
    let Some(first) = fields.iter().position(|f| !f.trim().is_empty()) else {
        return vec![""];
    };
    let last = fields
        .iter()
        .rposition(|f| !f.trim().is_empty())
        .unwrap_or(first);

    let mut kept = fields[first..=last].to_vec();
    kept[0] = kept[0].trim_start();
    let end = kept.len() - 1;
    kept[end] = kept[end].trim_end();
    kept
}

/// Ordered column names read from the first input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Column names in file order.
    pub columns: Vec<String>,
}

impl Header {
    /// Build a header from the (already trimmed) fields of the first line.
    pub fn from_fields(fields: &[&str]) -> Self {
        Self {
            columns: fields.iter().map(|f| (*f).to_owned()).collect(),
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the header has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}

/// Column name -> zero-based position in a [`Header`].
///
/// Built once per run. Duplicate names resolve to their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build the lookup table for `header`.
    pub fn from_header(header: &Header) -> Self {
        let mut positions = HashMap::with_capacity(header.len());
        for (idx, name) in header.names().enumerate() {
            positions.entry(name.to_owned()).or_insert(idx);
        }
        Self { positions }
    }

    /// Position of `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// A case-insensitive equality condition on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Column the condition applies to.
    pub column: String,
    /// Value the field is compared against.
    pub expected: String,
    folded: String,
}

impl Predicate {
    pub fn new(column: impl Into<String>, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        Self {
            column: column.into(),
            folded: expected.to_lowercase(),
            expected,
        }
    }

    /// Returns `true` if `value` equals the expected value, ignoring case.
    pub fn matches(&self, value: &str) -> bool {
        // Skip the allocation when the field is already lowercase.
        value == self.folded || value.to_lowercase() == self.folded
    }
}

/// Projected values of one accepted row, in the pipeline's output-column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Values aligned with [`ResultSet::columns`].
    pub values: Vec<String>,
}

impl OutputRecord {
    /// Create a record from already-ordered values.
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }
}

/// All accepted records of one run, held in memory until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    /// Output-column names in output order.
    pub columns: Vec<String>,
    /// Accepted records in input order.
    pub records: Vec<OutputRecord>,
}

impl ResultSet {
    /// Create an empty result set for the given output columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Append an accepted record.
    pub fn push(&mut self, record: OutputRecord) {
        self.records.push(record);
    }

    /// Number of accepted records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record was accepted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of `column` in record `row`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.records
            .get(row)
            .and_then(|r| r.values.get(col))
            .map(String::as_str)
    }
}
