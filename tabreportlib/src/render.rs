//! Fixed-width table rendering.
//!
//! Writes a report in three phases, each exactly once and in this order:
//!
//! 1. header lines, one token per column per line
//! 2. a single separator line of `separator_char` runs
//! 3. one body line per row
//!
//! Every field is left-justified, padded with `fill_char` to its column
//! width and followed by the field separator. Every line ends with `\n`.

use std::io::Write;

use tracing::debug;

use crate::error::ReportError;
use crate::header::HeaderTokens;
use crate::options::ReportOptions;
use crate::width::{display_width, ColumnWidths};
use crate::Result;

/// Renders resolved report data into a writer.
pub struct TableRenderer<'a> {
    options: &'a ReportOptions,
}

impl<'a> TableRenderer<'a> {
    pub fn new(options: &'a ReportOptions) -> Self {
        TableRenderer { options }
    }

    /// Write headers, separator line and body rows to `sink`.
    ///
    /// `rows` hold stringified cells in the same column order as `widths`.
    /// Headers and rows are checked against `widths` before anything is
    /// written. Returns the number of lines written.
    pub fn render<W>(
        &self,
        sink: &mut W,
        headers: &HeaderTokens,
        widths: &ColumnWidths,
        rows: &[Vec<String>],
    ) -> Result<usize>
    where
        W: Write + ?Sized,
    {
        check_shape(headers, widths, rows)?;
        let header_lines = self.write_headers(sink, headers, widths)?;
        self.write_separator(sink, widths)?;
        let body_lines = self.write_body(sink, widths, rows)?;

        debug!(header_lines, body_lines, "rendered table");
        Ok(header_lines + 1 + body_lines)
    }

    fn write_headers<W>(
        &self,
        sink: &mut W,
        headers: &HeaderTokens,
        widths: &ColumnWidths,
    ) -> Result<usize>
    where
        W: Write + ?Sized,
    {
        let line_count = headers.line_count();
        for line in 0..line_count {
            for (token, (column, width)) in headers.line(line).zip(widths.iter()) {
                self.write_field(sink, column, token, width)?;
            }
            sink.write_all(b"\n")?;
        }
        Ok(line_count)
    }

    fn write_separator<W>(&self, sink: &mut W, widths: &ColumnWidths) -> Result<()>
    where
        W: Write + ?Sized,
    {
        for (_, width) in widths.iter() {
            write_run(sink, self.options.separator_char, width)?;
            sink.write_all(self.options.field_separator.as_bytes())?;
        }
        sink.write_all(b"\n")?;
        Ok(())
    }

    fn write_body<W>(
        &self,
        sink: &mut W,
        widths: &ColumnWidths,
        rows: &[Vec<String>],
    ) -> Result<usize>
    where
        W: Write + ?Sized,
    {
        for row in rows {
            for (text, (column, width)) in row.iter().zip(widths.iter()) {
                self.write_field(sink, column, text, width)?;
            }
            sink.write_all(b"\n")?;
        }
        Ok(rows.len())
    }

    fn write_field<W>(&self, sink: &mut W, column: &str, text: &str, width: usize) -> Result<()>
    where
        W: Write + ?Sized,
    {
        let len = display_width(text);
        let padding = width
            .checked_sub(len)
            .ok_or_else(|| ReportError::WidthInvariantViolation {
                column: column.to_string(),
                width,
                len,
            })?;

        sink.write_all(text.as_bytes())?;
        write_run(sink, self.options.fill_char, padding)?;
        sink.write_all(self.options.field_separator.as_bytes())?;
        Ok(())
    }
}

fn check_shape(
    headers: &HeaderTokens,
    widths: &ColumnWidths,
    rows: &[Vec<String>],
) -> Result<()> {
    let expected = widths.len();
    if headers.column_count() != expected {
        return Err(ReportError::ShapeMismatch {
            what: "header".to_string(),
            expected,
            found: headers.column_count(),
        });
    }
    match rows.iter().position(|row| row.len() != expected) {
        Some(index) => Err(ReportError::ShapeMismatch {
            what: format!("row {index}"),
            expected,
            found: rows[index].len(),
        }),
        None => Ok(()),
    }
}

/// Write `c` repeated `count` times.
fn write_run<W>(sink: &mut W, c: char, count: usize) -> std::io::Result<()>
where
    W: Write + ?Sized,
{
    let mut buf = [0u8; 4];
    let encoded = c.encode_utf8(&mut buf).as_bytes();
    for _ in 0..count {
        sink.write_all(encoded)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn render_to_string(
        options: &ReportOptions,
        columns: &[&str],
        widths: &[usize],
        rows: &[&[&str]],
    ) -> Result<String> {
        let columns = cols(columns);
        let headers = HeaderTokens::from_columns(&columns, options.token_separator);
        let widths = ColumnWidths::new(columns, widths.to_vec()).unwrap();
        let rows: Vec<Vec<String>> = rows.iter().map(|r| cols(r)).collect();

        let mut out = Vec::new();
        TableRenderer::new(options).render(&mut out, &headers, &widths, &rows)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_single_row_layout() {
        let out = render_to_string(
            &ReportOptions::default(),
            &["id", "name"],
            &[2, 4],
            &[&["7", "Bob"]],
        )
        .unwrap();
        assert_eq!(out, "id name \n-- ---- \n7  Bob  \n");
    }

    #[test]
    fn test_multi_line_headers() {
        let out = render_to_string(
            &ReportOptions::default(),
            &["a", "b_c", "d_e_f"],
            &[1, 2, 1],
            &[&["1", "22", "3"]],
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec!["     d ", "  b  e ", "a c  f ", "- -- - ", "1 22 3 "]
        );
    }

    #[test]
    fn test_custom_fill_and_separator() {
        let options = ReportOptions::new()
            .fill_char('.')
            .separator_char('=')
            .field_separator("|");
        let out = render_to_string(&options, &["ab", "c"], &[3, 2], &[&["x", "yy"]]).unwrap();
        assert_eq!(out, "ab.|c.|\n===|==|\nx..|yy|\n");
    }

    #[test]
    fn test_zero_rows_still_writes_header_and_separator() {
        let out =
            render_to_string(&ReportOptions::default(), &["x_id", "y"], &[2, 1], &[]).unwrap();
        assert_eq!(out, "x    \nid y \n-- - \n");
    }

    #[test]
    fn test_multibyte_fill_char() {
        let options = ReportOptions::new().fill_char('·');
        let out = render_to_string(&options, &["abc"], &[4], &[&["é"]]).unwrap();
        assert_eq!(out, "abc· \n---- \né··· \n");
    }

    #[test]
    fn test_text_wider_than_width_is_invariant_violation() {
        let err = render_to_string(&ReportOptions::default(), &["id"], &[2], &[&["12345"]])
            .unwrap_err();
        match err {
            ReportError::WidthInvariantViolation { column, width, len } => {
                assert_eq!(column, "id");
                assert_eq!(width, 2);
                assert_eq!(len, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_returns_line_count() {
        let columns = cols(&["a_b"]);
        let headers = HeaderTokens::from_columns(&columns, '_');
        let widths = ColumnWidths::new(columns, vec![1]).unwrap();
        let rows = vec![cols(&["1"]), cols(&["2"]), cols(&["3"])];
        let options = ReportOptions::default();
        let mut out: Vec<u8> = Vec::new();
        let lines = TableRenderer::new(&options)
            .render(&mut out, &headers, &widths, &rows)
            .unwrap();
        assert_eq!(lines, 2 + 1 + 3);
    }

    #[test]
    fn test_short_row_is_rejected_before_writing() {
        let columns = cols(&["a", "b"]);
        let headers = HeaderTokens::from_columns(&columns, '_');
        let widths = ColumnWidths::new(columns, vec![1, 1]).unwrap();
        let rows = vec![cols(&["x", "y"]), cols(&["x"])];
        let options = ReportOptions::default();
        let mut out: Vec<u8> = Vec::new();

        let err = TableRenderer::new(&options)
            .render(&mut out, &headers, &widths, &rows)
            .unwrap_err();
        match err {
            ReportError::ShapeMismatch {
                what,
                expected,
                found,
            } => {
                assert_eq!(what, "row 1");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_headers_for_other_columns_are_rejected() {
        let headers = HeaderTokens::from_columns(&["a"], '_');
        let widths = ColumnWidths::new(cols(&["a", "b"]), vec![1, 1]).unwrap();
        let options = ReportOptions::default();
        let mut out: Vec<u8> = Vec::new();

        let err = TableRenderer::new(&options)
            .render(&mut out, &headers, &widths, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::ShapeMismatch { expected: 2, found: 1, .. }
        ));
        assert!(out.is_empty());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_sink_error() {
        let columns = cols(&["a"]);
        let headers = HeaderTokens::from_columns(&columns, '_');
        let widths = ColumnWidths::new(columns, vec![1]).unwrap();
        let options = ReportOptions::default();
        let err = TableRenderer::new(&options)
            .render(&mut FailingWriter, &headers, &widths, &[])
            .unwrap_err();
        assert!(matches!(err, ReportError::SinkWrite(_)));
    }
}
