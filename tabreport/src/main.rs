//! # tabreport
//!
//! A CLI that renders JSON records as a fixed-width text table.
//!
//! ## Overview
//!
//! tabreport is built on top of tabreportlib. It reads a JSON array of flat
//! objects (or generates sample records), sizes every column to fit its
//! widest value and header fragment, and prints the table.
//!
//! ## Usage
//!
//! ```bash
//! # Render records from a file
//! tabreport records.json
//!
//! # Read from stdin
//! cat records.json | tabreport
//!
//! # Pick and order columns
//! tabreport records.json --columns id,the_name
//!
//! # Generate 1000 sample records and time the render
//! tabreport --generate 1000 --seed 7 --time -o report.txt
//!
//! # Formatting
//! tabreport records.json --bool-style yes-no --float-precision 2 \
//!     --timestamp-format "%Y-%m-%d"
//! ```

mod input;
mod sample;

use std::io;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tabreportlib::{BoolStyle, ColumnOrder, FormatPolicy, Record, Report, ReportOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::input::FileConfig;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tabreport")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render JSON records as a fixed-width text table")
        .arg(
            Arg::new("input")
                .help("JSON file with an array of records ('-' or omitted for stdin)"),
        )
        .arg(
            Arg::new("generate")
                .short('g')
                .long("generate")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .conflicts_with("input")
                .help("Generate N sample records instead of reading input"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .default_value("42")
                .help("Seed for --generate"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the report to FILE instead of stdout"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format: the rendered table, or the records as JSON"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("JSON config file; command-line flags override its values"),
        )
        .arg(
            Arg::new("columns")
                .short('c')
                .long("columns")
                .value_delimiter(',')
                .help("Columns to display, in order (comma-separated)"),
        )
        .arg(
            Arg::new("fill")
                .long("fill")
                .value_parser(value_parser!(char))
                .help("Padding character (default: space)"),
        )
        .arg(
            Arg::new("separator-char")
                .long("separator-char")
                .value_parser(value_parser!(char))
                .help("Character of the line under the headers (default: -)"),
        )
        .arg(
            Arg::new("field-separator")
                .long("field-separator")
                .help("String written after each field (default: one space)"),
        )
        .arg(
            Arg::new("token-separator")
                .long("token-separator")
                .value_parser(value_parser!(char))
                .help("Character column names are split on for headers (default: _)"),
        )
        .arg(
            Arg::new("bool-style")
                .long("bool-style")
                .value_parser(value_parser!(BoolStyle))
                .help("Boolean rendering: true-false, yes-no, one-zero, letter"),
        )
        .arg(
            Arg::new("timestamp-format")
                .long("timestamp-format")
                .help("strftime format for timestamps (default: %Y-%m-%d %H:%M:%S)"),
        )
        .arg(
            Arg::new("float-precision")
                .long("float-precision")
                .value_parser(value_parser!(usize))
                .help("Number of decimals printed for floats"),
        )
        .arg(
            Arg::new("time")
                .long("time")
                .action(ArgAction::SetTrue)
                .help("Log how long rendering took"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
}

/// Load the config file, if any, and apply command-line overrides
fn build_config(matches: &ArgMatches) -> anyhow::Result<FileConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => input::read_config(path)?,
        None => FileConfig::default(),
    };

    let mut options: ReportOptions = config.report;
    if let Some(c) = matches.get_one::<char>("fill") {
        options = options.fill_char(*c);
    }
    if let Some(c) = matches.get_one::<char>("separator-char") {
        options = options.separator_char(*c);
    }
    if let Some(s) = matches.get_one::<String>("field-separator") {
        options = options.field_separator(s.as_str());
    }
    if let Some(c) = matches.get_one::<char>("token-separator") {
        options = options.token_separator(*c);
    }
    if let Some(columns) = matches.get_many::<String>("columns") {
        options = options.column_order(ColumnOrder::Explicit(columns.cloned().collect()));
    }
    config.report = options;

    let mut policy: FormatPolicy = config.format;
    if let Some(style) = matches.get_one::<BoolStyle>("bool-style") {
        policy = policy.bool_style(style.clone());
    }
    if let Some(fmt) = matches.get_one::<String>("timestamp-format") {
        policy = policy.timestamp_format(fmt.as_str());
    }
    if let Some(precision) = matches.get_one::<usize>("float-precision") {
        policy = policy.float_precision(*precision);
    }
    config.format = policy;

    Ok(config)
}

/// Get the records to render, generated or read
fn load_records(matches: &ArgMatches) -> anyhow::Result<Vec<Record>> {
    if let Some(count) = matches.get_one::<usize>("generate") {
        let seed = matches.get_one::<u64>("seed").copied().unwrap_or(42);
        debug!(count, seed, "generating sample records");
        return Ok(sample::generate(*count, seed));
    }
    input::read_records(matches.get_one::<String>("input").map(|s| s.as_str()))
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = build_config(matches)?;
    let records = load_records(matches)?;
    debug!(records = records.len(), "loaded records");

    if matches.get_one::<String>("format").map(|s| s.as_str()) == Some("json") {
        let stdout = io::stdout();
        serde_json::to_writer_pretty(stdout.lock(), &records)?;
        println!();
        return Ok(());
    }

    let report = Report::with_formatter(config.report, config.format);
    let started = Instant::now();

    let summary = match matches.get_one::<String>("output") {
        Some(path) => report
            .render_to_path(&records, path)
            .with_context(|| format!("failed to write report to '{}'", path))?,
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            report.render(&records, &mut lock)?
        }
    };

    if matches.get_flag("time") {
        info!(
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            rows = summary.rows,
            columns = summary.widths.len(),
            "rendered report"
        );
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `-v`
fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 if matches.get_flag("time") => "info",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
