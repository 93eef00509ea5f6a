//! Error types for tabreportlib

use thiserror::Error;

/// Errors that can occur while building or writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    /// Column names could not be determined (no records and no explicit order,
    /// or a record without fields)
    #[error("no columns: cannot determine column names for the report")]
    NoColumns,

    /// A record's column set differs from the first record's
    #[error("record {row} has inconsistent columns: expected [{}], found [{}]", expected.join(", "), found.join(", "))]
    InconsistentColumns {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// An explicit column order names a column the records don't have
    #[error("unknown column in column order: '{0}'")]
    UnknownColumn(String),

    /// An explicit column order lists the same column twice
    #[error("duplicate column in column order: '{0}'")]
    DuplicateColumn(String),

    /// Writing to the output sink failed
    #[error("failed to write report: {0}")]
    SinkWrite(#[from] std::io::Error),

    /// Headers or a body row don't have one entry per resolved column
    #[error("{what} has {found} columns, expected {expected}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// Text wider than its resolved column width reached the renderer
    #[error("width invariant violated for column '{column}': text of length {len} exceeds width {width}")]
    WidthInvariantViolation {
        column: String,
        width: usize,
        len: usize,
    },
}
