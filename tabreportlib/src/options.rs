//! Report layout options.
//!
//! This module contains the configuration types that control how a report
//! is laid out. Formatting of individual values lives in [`crate::format`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::header::DEFAULT_TOKEN_SEPARATOR;
use crate::value::Record;
use crate::Result;

/// Order in which columns are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrder {
    /// The first record's column names, sorted
    #[default]
    Sorted,
    /// An explicit list of column names; may omit columns
    Explicit(Vec<String>),
}

impl ColumnOrder {
    /// Resolve the display order against the first record, if any.
    ///
    /// With no records, an explicit order is taken as-is and a sorted order
    /// has nothing to draw names from.
    pub fn resolve(&self, first: Option<&Record>) -> Result<Vec<String>> {
        let columns = match (self, first) {
            (ColumnOrder::Sorted, Some(record)) => {
                record.columns().map(str::to_string).collect()
            }
            (ColumnOrder::Sorted, None) => Vec::new(),
            (ColumnOrder::Explicit(names), first) => {
                let mut seen = HashSet::new();
                for name in names {
                    if !seen.insert(name.as_str()) {
                        return Err(ReportError::DuplicateColumn(name.clone()));
                    }
                    if let Some(record) = first {
                        if record.get(name).is_none() {
                            return Err(ReportError::UnknownColumn(name.clone()));
                        }
                    }
                }
                names.clone()
            }
        };

        if columns.is_empty() {
            return Err(ReportError::NoColumns);
        }
        Ok(columns)
    }
}

/// Layout options for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Pads text to its column width
    pub fill_char: char,
    /// Repeated to draw the line under the headers
    pub separator_char: char,
    /// Written after every field, including the last
    pub field_separator: String,
    /// Splits column names into header tokens
    pub token_separator: char,
    pub column_order: ColumnOrder,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            fill_char: ' ',
            separator_char: '-',
            field_separator: " ".to_string(),
            token_separator: DEFAULT_TOKEN_SEPARATOR,
            column_order: ColumnOrder::default(),
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the padding character
    pub fn fill_char(mut self, c: char) -> Self {
        self.fill_char = c;
        self
    }

    /// Builder: set the header separator line character
    pub fn separator_char(mut self, c: char) -> Self {
        self.separator_char = c;
        self
    }

    /// Builder: set the string written after each field
    pub fn field_separator(mut self, s: impl Into<String>) -> Self {
        self.field_separator = s.into();
        self
    }

    /// Builder: set the character column names are split on
    pub fn token_separator(mut self, c: char) -> Self {
        self.token_separator = c;
        self
    }

    /// Builder: display columns in the given order
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_order = ColumnOrder::Explicit(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: set the column order
    pub fn column_order(mut self, order: ColumnOrder) -> Self {
        self.column_order = order;
        self
    }
}
