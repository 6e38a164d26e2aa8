//! The two fixed pipeline definitions and the project directory layout they read from and write to.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::Predicate;

/// Which built-in pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    /// NPInter v5: binding RNA-protein interactions.
    NpInter5,
    /// RNAInter: pass-through projection of symbol pairs and score.
    RnaInter,
}

impl PipelineKind {
    /// Build the configuration for this pipeline.
    pub fn config(self) -> PipelineConfig {
        match self {
            PipelineKind::NpInter5 => PipelineConfig::npinter5(),
            PipelineKind::RnaInter => PipelineConfig::rnainter(),
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::NpInter5 => f.write_str("npinter5"),
            PipelineKind::RnaInter => f.write_str("rnainter"),
        }
    }
}

/// Everything a run needs to know about one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Short name used in logs.
    pub name: String,
    /// Input file name inside the raw-data directory.
    pub input_file: String,
    /// Output file name inside the processed-data directory.
    pub output_file: String,
    /// Output columns, in output order.
    pub output_columns: Vec<String>,
    /// Conjunctive row predicates. Empty means every well-formed row is accepted.
    pub predicates: Vec<Predicate>,
    /// Message reported when no row was accepted.
    pub empty_message: String,
    /// Whether the missing-column diagnostic also lists the required columns.
    pub report_required_columns: bool,
}

impl PipelineConfig {
    /// Pipeline A: keep rows where `class` is `binding` and `level` is `rna-protein`.
    pub fn npinter5() -> Self {
        Self {
            name: PipelineKind::NpInter5.to_string(),
            input_file: "interaction_NPInterv5.txt".to_string(),
            output_file: "NPInter5_processed_data.csv".to_string(),
            output_columns: owned(&["ncName", "ncID", "tarName", "tarID", "tag", "class"]),
            predicates: vec![
                Predicate::new("class", "binding"),
                Predicate::new("level", "rna-protein"),
            ],
            empty_message: "No matching data found.".to_string(),
            report_required_columns: false,
        }
    }

    /// Pipeline B: project symbol pairs and score from every row.
    pub fn rnainter() -> Self {
        Self {
            name: PipelineKind::RnaInter.to_string(),
            input_file: "rnainter.txt".to_string(),
            output_file: "rnainter_processed_data.csv".to_string(),
            output_columns: owned(&["Interactor1.Symbol", "Interactor2.Symbol", "score"]),
            predicates: Vec::new(),
            empty_message: "No data found in the file.".to_string(),
            report_required_columns: true,
        }
    }

    /// Predicate columns followed by output columns, deduplicated in first-seen order.
    pub fn required_columns(&self) -> Vec<String> {
        let mut required: Vec<String> = Vec::new();
        let names = self
            .predicates
            .iter()
            .map(|p| &p.column)
            .chain(self.output_columns.iter());
        for name in names {
            if !required.contains(name) {
                required.push(name.clone());
            }
        }
        required
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Directory layout derived from a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root; everything else is relative to it.
    pub root: PathBuf,
}

impl ProjectLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `<root>/data/raw`
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("data").join("raw")
    }

    /// `<root>/data/processed`
    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("data").join("processed")
    }

    /// Input path for `config`.
    pub fn input_path(&self, config: &PipelineConfig) -> PathBuf {
        self.raw_dir().join(&config.input_file)
    }

    /// Output path for `config`.
    pub fn output_path(&self, config: &PipelineConfig) -> PathBuf {
        self.processed_dir().join(&config.output_file)
    }
}
