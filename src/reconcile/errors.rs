
use std::path::PathBuf;

use crate::data_types::read_category::TableRole;

/// The reconciliation steps we report failures against
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
pub enum ReconcileStep {
    #[strum(to_string = "loading the original MAF")]
    LoadOriginal,
    #[strum(to_string = "loading the genotyped MAF")]
    LoadTable,
    #[strum(to_string = "preparing the simplex table")]
    PrepareSimplex,
    #[strum(to_string = "preparing the duplex table")]
    PrepareDuplex,
    #[strum(to_string = "merging simplex and duplex counts")]
    MergeSimplexDuplex,
    #[strum(to_string = "preparing the standard table")]
    PrepareStandard,
    #[strum(to_string = "preparing the simplex-duplex table")]
    PrepareSimplexDuplex,
    #[strum(to_string = "preparing the original table")]
    PrepareOriginal,
    #[strum(to_string = "merging all MAF tables")]
    MergeAll,
    #[strum(to_string = "generating the summary field")]
    Summary,
    #[strum(to_string = "running GBCMS")]
    Genotyping,
    #[strum(to_string = "writing the reconciled MAF")]
    WriteTable
}

/// Errors produced while reading, reconciling, or writing variant tables; all are fatal to the current run
#[derive(thiserror::Error, Debug)]
pub enum ReconcileError {
    #[error("{table} table is missing required column {column:?}")]
    MissingColumn { table: TableRole, column: String },
    #[error("{table} table contains duplicate mutation key {key}")]
    DuplicateKey { table: TableRole, key: String },
    #[error("{table} table contains duplicate column {column:?}")]
    DuplicateColumn { table: TableRole, column: String },
    #[error("insufficient input tables: {reason}")]
    InsufficientInput { reason: String },
    #[error("{table} table has invalid {column:?} value {value:?} on data row {row}")]
    InvalidValue { table: TableRole, column: String, row: usize, value: String },
    #[error("{table} table row {row} has {found} fields, expected {expected}")]
    RowLength { table: TableRole, row: usize, found: usize, expected: usize },
    #[error("external tool failure: {reason}")]
    ExternalToolFailure { reason: String },
    #[error("I/O error for {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("error parsing {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{step} failed: {source}")]
    StepFailed { step: ReconcileStep, source: Box<ReconcileError> }
}

impl ReconcileError {
    /// Shortcut for building a missing column error
    pub fn missing_column(table: TableRole, column: &str) -> ReconcileError {
        ReconcileError::MissingColumn { table, column: column.to_string() }
    }

    /// Returns the innermost error, skipping any step context
    pub fn root_cause(&self) -> &ReconcileError {
        match self {
            ReconcileError::StepFailed { source, .. } => source.root_cause(),
            other => other
        }
    }

    /// True if this error came from the external genotyping tool rather than the tables
    pub fn is_external(&self) -> bool {
        matches!(self.root_cause(), ReconcileError::ExternalToolFailure { .. })
    }

    /// True if this error came from file reading or writing
    pub fn is_io(&self) -> bool {
        matches!(self.root_cause(), ReconcileError::Io { .. } | ReconcileError::Csv { .. })
    }
}

/// Attaches the failing step to an error, keeping the first (innermost) step if one is already set
pub trait StepContext<T> {
    fn in_step(self, step: ReconcileStep) -> Result<T, ReconcileError>;
}

impl<T> StepContext<T> for Result<T, ReconcileError> {
    fn in_step(self, step: ReconcileStep) -> Result<T, ReconcileError> {
        self.map_err(|e| match e {
            ReconcileError::StepFailed { .. } => e,
            other => ReconcileError::StepFailed { step, source: Box::new(other) }
        })
    }
}
