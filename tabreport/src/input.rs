//! Loading records and configuration from JSON.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tabreportlib::{FormatPolicy, Record, ReportOptions};

/// Contents of a `--config` file. Both sections are optional.
///
/// ```json
/// {
///   "report": { "fill_char": ".", "column_order": { "explicit": ["id", "the_name"] } },
///   "format": { "bool_style": "yes_no", "float_precision": 2 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub report: ReportOptions,
    pub format: FormatPolicy,
}

/// Read a JSON array of records from `path`, or stdin for `None` / `-`.
pub fn read_records(path: Option<&str>) -> anyhow::Result<Vec<Record>> {
    match path {
        None | Some("-") => {
            parse_records(io::stdin().lock()).context("failed to read records from stdin")
        }
        Some(path) => {
            let file = open(path)?;
            parse_records(BufReader::new(file))
                .with_context(|| format!("failed to read records from '{}'", path))
        }
    }
}

fn parse_records<R: Read>(reader: R) -> anyhow::Result<Vec<Record>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a config file.
pub fn read_config(path: &str) -> anyhow::Result<FileConfig> {
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid config file '{}'", path))
}

fn open(path: &str) -> anyhow::Result<File> {
    if !Path::new(path).exists() {
        anyhow::bail!("path does not exist: {}", path);
    }
    File::open(path).with_context(|| format!("failed to open '{}'", path))
}
