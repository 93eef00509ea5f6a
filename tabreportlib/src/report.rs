//! The report pipeline: header tokenizer, width resolver, table renderer.
//!
//! The data flow is:
//! 1. Column order resolved against the first record
//! 2. Header tokens (split + normalized)
//! 3. Stringified rows and column widths (single pass)
//! 4. Rendered output
//!
//! Steps 1-3 can fail on bad input; they all complete before the first byte
//! is written, so an inconsistent record never leaves a half-written report.

use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::format::{DisplayFormatter, ValueFormatter};
use crate::header::HeaderTokens;
use crate::options::ReportOptions;
use crate::render::TableRenderer;
use crate::value::Record;
use crate::width::{resolve, ColumnWidths, Resolved};
use crate::Result;

/// What was written by a successful render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub header_lines: usize,
    pub rows: usize,
    /// Total lines written: headers + separator + rows
    pub lines: usize,
    pub widths: ColumnWidths,
}

/// Headers and resolved rows, ready to be written.
struct Prepared {
    headers: HeaderTokens,
    resolved: Resolved,
}

/// A configured report renderer.
///
/// Holds the layout options and the value formatter; each call to
/// [`Report::render`] runs the full pipeline over one record set.
#[derive(Debug, Clone)]
pub struct Report<F = DisplayFormatter> {
    options: ReportOptions,
    formatter: F,
}

impl Report<DisplayFormatter> {
    /// Create a report that formats values with their `Display` output.
    pub fn new(options: ReportOptions) -> Self {
        Report {
            options,
            formatter: DisplayFormatter,
        }
    }
}

impl Default for Report<DisplayFormatter> {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

impl<F: ValueFormatter> Report<F> {
    /// Create a report with a custom value formatter.
    pub fn with_formatter(options: ReportOptions, formatter: F) -> Self {
        Report { options, formatter }
    }

    /// Render `records` into `sink` and flush it.
    pub fn render<I, R, W>(&self, records: I, sink: &mut W) -> Result<ReportSummary>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<Record>,
        W: Write + ?Sized,
    {
        let prepared = self.prepare(records)?;
        self.write(prepared, sink)
    }

    /// Resolve column order, headers and widths without touching any sink.
    fn prepare<I, R>(&self, records: I) -> Result<Prepared>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<Record>,
    {
        let mut records = records.into_iter().peekable();
        let first = records.peek().map(|r| <R as Borrow<Record>>::borrow(r));
        let columns = self.options.column_order.resolve(first)?;
        debug!(columns = ?columns, "resolved column order");

        let headers = HeaderTokens::from_columns(&columns, self.options.token_separator);
        let resolved = resolve(records, &columns, &headers, &self.formatter)?;
        Ok(Prepared { headers, resolved })
    }

    fn write<W>(&self, prepared: Prepared, sink: &mut W) -> Result<ReportSummary>
    where
        W: Write + ?Sized,
    {
        let Prepared { headers, resolved } = prepared;
        let lines = TableRenderer::new(&self.options).render(
            sink,
            &headers,
            &resolved.widths,
            &resolved.rows,
        )?;
        sink.flush()?;

        Ok(ReportSummary {
            header_lines: headers.line_count(),
            rows: resolved.rows.len(),
            lines,
            widths: resolved.widths,
        })
    }

    /// Render `records` into a string.
    pub fn render_to_string<I, R>(&self, records: I) -> Result<String>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<Record>,
    {
        let mut out = Vec::new();
        self.render(records, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Render `records` into a newly created file at `path`.
    ///
    /// The file is only created once the records have been resolved, so
    /// bad input leaves an existing file at `path` untouched. The file is
    /// closed when this returns; a write failure may leave a partial report.
    pub fn render_to_path<I, R>(
        &self,
        records: I,
        path: impl AsRef<Path>,
    ) -> Result<ReportSummary>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<Record>,
    {
        let path = path.as_ref();
        let prepared = self.prepare(records)?;
        let mut writer = BufWriter::new(File::create(path)?);
        let summary = self.write(prepared, &mut writer)?;
        debug!(path = %path.display(), lines = summary.lines, "wrote report file");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::format::{BoolStyle, FormatPolicy, ValueOnly};
    use crate::value::Value;

    #[test]
    fn test_render_single_record() {
        let records = vec![Record::new().with("id", "7").with("name", "Bob")];
        let report = Report::new(ReportOptions::new().columns(["id", "name"]));
        let out = report.render_to_string(&records).unwrap();
        assert_eq!(out, "id name \n-- ---- \n7  Bob  \n");
    }

    #[test]
    fn test_default_order_is_sorted() {
        let records = vec![Record::new().with("zz", 1).with("aa", 2)];
        let out = Report::new(ReportOptions::default())
            .render_to_string(&records)
            .unwrap();
        assert_eq!(out.lines().next(), Some("aa zz "));
    }

    #[test]
    fn test_no_records_with_explicit_columns() {
        let report = Report::new(ReportOptions::new().columns(["x_id", "y"]));
        let mut out = Vec::new();
        let summary = report.render(Vec::<Record>::new(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x    \nid y \n-- - \n");
        assert_eq!(summary.header_lines, 2);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.lines, 3);
    }

    #[test]
    fn test_no_records_without_columns_is_error() {
        let err = Report::new(ReportOptions::default())
            .render_to_string(Vec::<Record>::new())
            .unwrap_err();
        assert!(matches!(err, ReportError::NoColumns));
    }

    #[test]
    fn test_inconsistent_records_write_nothing() {
        let records = vec![Record::new().with("a", 1), Record::new().with("b", 1)];
        let mut out: Vec<u8> = Vec::new();
        let err = Report::new(ReportOptions::default())
            .render(&records, &mut out)
            .unwrap_err();
        assert!(matches!(err, ReportError::InconsistentColumns { row: 1, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_format_policy_drives_widths() {
        let records = vec![
            Record::new().with("is_ok", true).with("n", 1.0),
            Record::new().with("is_ok", false).with("n", 2.5),
        ];
        let policy = FormatPolicy::new()
            .bool_style(BoolStyle::YesNo)
            .float_precision(3);
        let report = Report::with_formatter(ReportOptions::default(), policy);
        let out = report.render_to_string(&records).unwrap();
        assert_eq!(
            out,
            "is        \nok  n     \n--- ----- \nyes 1.000 \nno  2.500 \n"
        );
    }

    #[test]
    fn test_value_only_formatter() {
        let records = vec![Record::new().with("word", "hi")];
        let report = Report::with_formatter(
            ReportOptions::default(),
            ValueOnly(|v: &Value| v.to_string().repeat(3)),
        );
        assert_eq!(
            report.render_to_string(&records).unwrap(),
            "word   \n------ \nhihihi \n"
        );
    }

    #[test]
    fn test_summary_widths() {
        let records = vec![Record::new().with("a", "12345").with("b_c", "x")];
        let summary = Report::new(ReportOptions::default())
            .render(&records, &mut Vec::<u8>::new())
            .unwrap();
        assert_eq!(summary.widths.get("a"), Some(5));
        assert_eq!(summary.widths.get("b_c"), Some(1));
        assert_eq!(summary.header_lines, 2);
    }

    #[test]
    fn test_render_to_path_keeps_existing_file_on_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "PREVIOUS REPORT\n").unwrap();

        let records = vec![Record::new().with("a", 1), Record::new().with("b", 2)];
        let err = Report::new(ReportOptions::default())
            .render_to_path(&records, &path)
            .unwrap_err();
        assert!(matches!(err, ReportError::InconsistentColumns { row: 1, .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "PREVIOUS REPORT\n");
    }

    #[test]
    fn test_render_accepts_owned_records() {
        let records = vec![Record::new().with("k", 1)];
        let out = Report::new(ReportOptions::default()).render_to_string(records).unwrap();
        assert_eq!(out, "k \n- \n1 \n");
    }
}
