//! Value-to-string conversion.
//!
//! Every cell passes through exactly one [`ValueFormatter`] call. The
//! pipeline is generic over this capability, so callers change date formats,
//! boolean rendering and so on without touching width resolution or
//! rendering.
//!
//! The built-in formatters escape control characters (`\n` becomes the two
//! characters `\` `n`), so every cell stays on a single line and its
//! character count is its display width. Custom formatters own their output.
//!
//! Two call shapes are accepted:
//!
//! ```rust
//! use tabreportlib::{Value, ValueFormatter, ValueOnly};
//!
//! // (column, value) -> String
//! let per_column = |column: &str, value: &Value| format!("{column}={value}");
//! assert_eq!(per_column.format("id", &Value::from(3)), "id=3");
//!
//! // value -> String
//! let value_only = ValueOnly(|value: &Value| value.to_string().to_uppercase());
//! assert_eq!(value_only.format("name", &Value::from("bob")), "BOB");
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::value::{Value, DEFAULT_TIMESTAMP_FORMAT};

/// Converts a cell value to its display string.
pub trait ValueFormatter {
    fn format(&self, column: &str, value: &Value) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(&str, &Value) -> String,
{
    fn format(&self, column: &str, value: &Value) -> String {
        self(column, value)
    }
}

/// Adapter for formatters that ignore the column name.
#[derive(Debug, Clone, Copy)]
pub struct ValueOnly<F>(pub F);

impl<F> ValueFormatter for ValueOnly<F>
where
    F: Fn(&Value) -> String,
{
    fn format(&self, _column: &str, value: &Value) -> String {
        (self.0)(value)
    }
}

/// Formats values with their `Display` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFormatter;

impl ValueFormatter for DisplayFormatter {
    fn format(&self, _column: &str, value: &Value) -> String {
        escape_control(value.to_string())
    }
}

/// Replace control characters with their escaped form.
pub fn escape_control(text: String) -> String {
    if !text.chars().any(char::is_control) {
        return text;
    }
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

/// How booleans are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolStyle {
    /// `true` / `false`
    #[default]
    TrueFalse,
    /// `yes` / `no`
    YesNo,
    /// `1` / `0`
    OneZero,
    /// `Y` / `N`
    Letter,
}

impl BoolStyle {
    pub fn render(&self, value: bool) -> &'static str {
        match (self, value) {
            (BoolStyle::TrueFalse, true) => "true",
            (BoolStyle::TrueFalse, false) => "false",
            (BoolStyle::YesNo, true) => "yes",
            (BoolStyle::YesNo, false) => "no",
            (BoolStyle::OneZero, true) => "1",
            (BoolStyle::OneZero, false) => "0",
            (BoolStyle::Letter, true) => "Y",
            (BoolStyle::Letter, false) => "N",
        }
    }
}

impl FromStr for BoolStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "true-false" | "truefalse" | "true_false" => Ok(BoolStyle::TrueFalse),
            "yes-no" | "yesno" | "yes_no" => Ok(BoolStyle::YesNo),
            "one-zero" | "onezero" | "one_zero" | "10" => Ok(BoolStyle::OneZero),
            "letter" | "yn" => Ok(BoolStyle::Letter),
            _ => Err(format!("Unknown boolean style: {}", s)),
        }
    }
}

/// A configurable formatter covering the common formatting choices.
///
/// Timestamps use `timestamp_format` unless the column has its own entry in
/// `column_timestamp_formats`. Floats print with `float_precision` decimals
/// when set, otherwise with their shortest exact representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatPolicy {
    pub timestamp_format: String,
    pub column_timestamp_formats: BTreeMap<String, String>,
    pub bool_style: BoolStyle,
    pub float_precision: Option<usize>,
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            column_timestamp_formats: BTreeMap::new(),
            bool_style: BoolStyle::default(),
            float_precision: None,
        }
    }
}

impl FormatPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the default timestamp format (chrono `strftime` syntax)
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Builder: override the timestamp format for one column
    pub fn column_timestamp_format(
        mut self,
        column: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        self.column_timestamp_formats
            .insert(column.into(), format.into());
        self
    }

    /// Builder: set boolean rendering
    pub fn bool_style(mut self, style: BoolStyle) -> Self {
        self.bool_style = style;
        self
    }

    /// Builder: fix the number of decimals printed for floats
    pub fn float_precision(mut self, precision: usize) -> Self {
        self.float_precision = Some(precision);
        self
    }
}

impl ValueFormatter for FormatPolicy {
    fn format(&self, column: &str, value: &Value) -> String {
        let text = match value {
            Value::Boolean(b) => self.bool_style.render(*b).to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(x) => match self.float_precision {
                Some(precision) => format!("{:.*}", precision, x),
                None => x.to_string(),
            },
            Value::Timestamp(ts) => {
                let fmt = self
                    .column_timestamp_formats
                    .get(column)
                    .unwrap_or(&self.timestamp_format);
                format_timestamp(ts, fmt)
            }
            Value::Text(s) => s.clone(),
        };
        escape_control(text)
    }
}

/// Format with a user-supplied strftime pattern, falling back to RFC 3339
/// when the pattern is invalid.
fn format_timestamp(ts: &DateTime<Utc>, fmt: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", ts.format(fmt)) {
        Ok(()) => out,
        Err(_) => {
            warn!(format = fmt, "invalid timestamp format, using RFC 3339");
            ts.to_rfc3339()
        }
    }
}
