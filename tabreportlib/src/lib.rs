//! # tabreportlib
//!
//! Renders a set of records (column name → value) as a fixed-width text
//! table, the way a database client prints query results.
//!
//! ## Overview
//!
//! Column widths come from the data: every column is as wide as its widest
//! value or its widest header fragment. Column names are split into
//! fragments on `_` and stacked into multi-line headers, bottom-aligned:
//!
//! ```text
//!    the
//! id timestamp           active
//! -- ------------------- ------
//! 1  2024-01-02 03:04:05 true
//! ```
//!
//! The pipeline has three stages, run strictly in order:
//!
//! - **Header tokenizer** ([`header`]): split and normalize column names
//! - **Width resolver** ([`width`]): stringify every cell once, folding the
//!   column widths into the same pass
//! - **Table renderer** ([`render`]): headers, separator line, body rows
//!
//! Values are stringified through a [`ValueFormatter`], the single place
//! where formatting policy (date formats, boolean rendering, ...) lives.
//!
//! ## Example
//!
//! ```rust
//! use tabreportlib::{Record, Report, ReportOptions};
//!
//! let records = vec![
//!     Record::new().with("id", 7).with("name", "Bob"),
//!     Record::new().with("id", 12).with("name", "Alice"),
//! ];
//!
//! let report = Report::new(ReportOptions::new().columns(["id", "name"]));
//! let out = report.render_to_string(&records).unwrap();
//!
//! assert_eq!(
//!     out,
//!     "id name  \n-- ----- \n7  Bob   \n12 Alice \n"
//! );
//! ```

pub mod error;
pub mod format;
pub mod header;
pub mod options;
pub mod render;
pub mod report;
pub mod value;
pub mod width;

pub use error::ReportError;
pub use format::{
    escape_control, BoolStyle, DisplayFormatter, FormatPolicy, ValueFormatter, ValueOnly,
};
pub use header::{normalize, tokenize, HeaderTokens, DEFAULT_TOKEN_SEPARATOR};
pub use options::{ColumnOrder, ReportOptions};
pub use render::TableRenderer;
pub use report::{Report, ReportSummary};
pub use value::{Record, Value, DEFAULT_TIMESTAMP_FORMAT};
pub use width::{display_width, resolve, ColumnWidths, Resolved};

/// Result type for tabreportlib operations
pub type Result<T> = std::result::Result<T, ReportError>;
