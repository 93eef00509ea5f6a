//! Column width resolution.
//!
//! Stringifies every cell exactly once and folds the per-column maximum into
//! the same pass, then merges in the header token widths:
//!
//! `width[c] = max(max value width of c (0 without rows), max header token width of c)`
//!
//! The first record fixes the column set; any later record with a different
//! key set fails the resolution with [`ReportError::InconsistentColumns`].
//! Nothing has been written to the sink at that point.

use std::borrow::Borrow;

use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;
use crate::format::ValueFormatter;
use crate::header::HeaderTokens;
use crate::value::Record;
use crate::Result;

/// Display width of a string: its character count.
pub fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Resolved width per column, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnWidths {
    columns: Vec<String>,
    widths: Vec<usize>,
}

impl ColumnWidths {
    /// Pair column names with widths, both in display order.
    pub(crate) fn new(columns: Vec<String>, widths: Vec<usize>) -> Result<Self> {
        if columns.len() != widths.len() {
            return Err(ReportError::ShapeMismatch {
                what: "width table".to_string(),
                expected: columns.len(),
                found: widths.len(),
            });
        }
        Ok(ColumnWidths { columns, widths })
    }

    /// Width of a column by name.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.widths.get(i).copied())
    }

    /// Width of a column by display position.
    pub fn at(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// `(column, width)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.widths.iter().copied())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.widths
    }

    /// Sum of all column widths.
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Output of width resolution: stringified rows plus the width table.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// One entry per record, cells in display order.
    pub rows: Vec<Vec<String>>,
    /// Widest stringified value per column (0 when there are no rows).
    pub value_widths: Vec<usize>,
    /// Final widths: value widths merged with header widths.
    pub widths: ColumnWidths,
}

struct Accumulator {
    expected: Option<Vec<String>>,
    value_widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

/// Stringify all records and compute the column widths in one pass.
///
/// `columns` is the display order and may be a subset of the records'
/// columns. `headers` must have been built from the same `columns`.
pub fn resolve<I, R, F>(
    records: I,
    columns: &[String],
    headers: &HeaderTokens,
    formatter: &F,
) -> Result<Resolved>
where
    I: IntoIterator<Item = R>,
    R: Borrow<Record>,
    F: ValueFormatter + ?Sized,
{
    let initial = Accumulator {
        expected: None,
        value_widths: vec![0; columns.len()],
        rows: Vec::new(),
    };

    let acc = records
        .into_iter()
        .enumerate()
        .try_fold(initial, |acc, (index, record)| {
            step(acc, index, record.borrow(), columns, formatter)
        })?;

    let header_widths = headers.widths();
    let widths: Vec<usize> = acc
        .value_widths
        .iter()
        .zip(header_widths.iter().chain(std::iter::repeat(&0)))
        .map(|(value, header)| (*value).max(*header))
        .collect();

    debug!(
        rows = acc.rows.len(),
        columns = columns.len(),
        total_width = widths.iter().sum::<usize>(),
        "resolved column widths"
    );

    Ok(Resolved {
        rows: acc.rows,
        value_widths: acc.value_widths,
        widths: ColumnWidths::new(columns.to_vec(), widths)?,
    })
}

fn step<F>(
    mut acc: Accumulator,
    index: usize,
    record: &Record,
    columns: &[String],
    formatter: &F,
) -> Result<Accumulator>
where
    F: ValueFormatter + ?Sized,
{
    match &acc.expected {
        None => {
            let missing = columns.iter().find(|c| record.get(c.as_str()).is_none());
            if let Some(column) = missing {
                return Err(ReportError::UnknownColumn(column.clone()));
            }
            acc.expected = Some(record.columns().map(str::to_string).collect());
        }
        Some(expected) => {
            if !record.has_same_columns(expected) {
                return Err(ReportError::InconsistentColumns {
                    row: index,
                    expected: expected.clone(),
                    found: record.columns().map(str::to_string).collect(),
                });
            }
        }
    }

    let mut cells = Vec::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        let value = record
            .get(column)
            .ok_or_else(|| ReportError::UnknownColumn(column.clone()))?;
        let text = formatter.format(column, value);
        acc.value_widths[i] = acc.value_widths[i].max(display_width(&text));
        cells.push(text);
    }
    acc.rows.push(cells);

    Ok(acc)
}
