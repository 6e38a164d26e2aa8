//! Header resolution: header line -> column positions for predicates and outputs.

use crate::error::{FilterError, FilterResult};
use crate::pipeline::PipelineConfig;
use crate::types::{ColumnIndex, Header, OutputRecord, Predicate};

/// A header together with every position the scan needs.
#[derive(Debug, Clone)]
pub struct ResolvedHeader {
    pub header: Header,
    pub index: ColumnIndex,
    predicates: Vec<(Predicate, usize)>,
    output_positions: Vec<usize>,
}

impl ResolvedHeader {
    /// Number of fields every data row must have.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Returns `true` if `fields` satisfies every predicate.
    ///
    /// `fields` must already have [`Self::width`] entries.
    pub fn accepts(&self, fields: &[&str]) -> bool {
        self.predicates
            .iter()
            .all(|(predicate, idx)| predicate.matches(fields[*idx]))
    }

    /// Extract the output columns from `fields`, in output order.
    pub fn project(&self, fields: &[&str]) -> OutputRecord {
        OutputRecord::new(
            self.output_positions
                .iter()
                .map(|&idx| fields[idx].to_owned())
                .collect(),
        )
    }
}

/// Treat `fields` (the trimmed first line) as the header and resolve every column `config`
/// refers to.
///
/// Fails with [`FilterError::MissingColumns`], listing all absent names at once.
pub fn resolve_header(fields: &[&str], config: &PipelineConfig) -> FilterResult<ResolvedHeader> {
    let header = Header::from_fields(fields);
    let index = ColumnIndex::from_header(&header);

    let required = config.required_columns();
    let missing: Vec<String> = required
        .iter()
        .filter(|name| index.position(name).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(FilterError::MissingColumns {
            missing,
            required,
            header: header.columns,
        });
    }

    // Every lookup below is covered by `required`.
    let mut predicates = Vec::with_capacity(config.predicates.len());
    for predicate in &config.predicates {
        if let Some(idx) = index.position(&predicate.column) {
            predicates.push((predicate.clone(), idx));
        }
    }
    let output_positions = config
        .output_columns
        .iter()
        .filter_map(|name| index.position(name))
        .collect();

    Ok(ResolvedHeader {
        header,
        index,
        predicates,
        output_positions,
    })
}
