// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cfgexpand` - expand environment variables in a YAML or JSON document.
//!
//! Reads a file, or standard input when the path is omitted or `-`, expands every
//! `${VAR}` style reference against the current environment, and prints the
//! decoded document to standard output.
//!
//! ```text
//! cfgexpand config.yaml
//! cat config.yaml | cfgexpand | jq .database.host
//! DB_HOST=prod-db cfgexpand --format yaml production.yaml
//! ```

use cfgexpand::adapters::read_document;
use cfgexpand::domain::{ExpandError, Result};
use cfgexpand::service::{read_limited, Expander, DEFAULT_BUDGET};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: cfgexpand <yaml|json-file> OR cat config.yaml | cfgexpand";

#[derive(Parser)]
#[command(name = "cfgexpand")]
#[command(about = "Expand environment variables in YAML/JSON configuration")]
#[command(version)]
struct Cli {
    /// Input file; reads standard input when omitted or "-"
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Maximum number of resolution passes per value
    #[arg(long, default_value_t = DEFAULT_BUDGET)]
    budget: usize,

    /// Fail when references remain unresolved after the last pass
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = match read_input(cli.file.as_ref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if input.trim().is_empty() {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    }

    let mut expander = Expander::new().with_budget(cli.budget).strict(cli.strict);
    let document: serde_yaml::Value = match expander.decode_str(&input) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error processing file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match render(&document, cli.format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => read_document(path),
        _ => {
            let bytes = read_limited(io::stdin().lock())?;
            String::from_utf8(bytes).map_err(ExpandError::parse)
        }
    }
}

fn render(document: &serde_yaml::Value, format: Format) -> io::Result<()> {
    let text = match format {
        Format::Json => {
            let mut text = serde_json::to_string_pretty(document)?;
            text.push('\n');
            text
        }
        Format::Yaml => serde_yaml::to_string(document)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
