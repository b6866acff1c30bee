#![deny(missing_docs)]

//! # Convert Command
//!
//! Implements the pipeline: API definition -> example payloads -> Postman collection.
//!
//! 1. **Load**: Fetch the document over HTTP or read it from disk.
//! 2. **Convert**: Build the collection through `s2p_core`.
//! 3. **Report**: Log operation count, parameter fallbacks and circular references.
//! 4. **Write**: Serialize the collection as pretty JSON.

use crate::error::{CliError, CliResult};
use crate::source::{fetch_document, read_document};
use s2p_core::oas::DEFAULT_MAX_DEPTH;
use s2p_core::{convert_document, ConversionReport, ConvertOptions};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Largest accepted `--max-depth`. Both bounds recurse on the stack.
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Arguments for the conversion.
#[derive(clap::Args, Debug, Clone)]
#[clap(group(clap::ArgGroup::new("source").required(true).args(["url", "input"])))]
pub struct ConvertArgs {
    /// URL of the Swagger / OpenAPI JSON or YAML document.
    #[clap(long)]
    pub url: Option<String>,

    /// Local Swagger / OpenAPI document (.json, .yaml or .yml).
    #[clap(long)]
    pub input: Option<PathBuf>,

    /// Header sent with the fetch and added to every request.
    /// Format: `"Key: Value"`. Repeatable.
    #[clap(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Output path for the collection.
    #[clap(long, default_value = "postman_collection.json")]
    pub output: PathBuf,

    /// Depth bound for reference resolution and example generation.
    #[clap(
        long,
        env = "S2P_MAX_DEPTH",
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = parse_max_depth
    )]
    pub max_depth: usize,
}

/// Helper to parse "Key: Value" header arguments.
fn parse_header(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid header `{}`: expected `Key: Value`", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid header `{}`: empty name", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Helper to parse `--max-depth` within `1..=MAX_DEPTH_LIMIT`.
fn parse_max_depth(s: &str) -> Result<usize, String> {
    let depth: usize = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid depth `{}`: {}", s, e))?;
    if depth == 0 || depth > MAX_DEPTH_LIMIT {
        return Err(format!(
            "depth must be between 1 and {}, got {}",
            MAX_DEPTH_LIMIT, depth
        ));
    }
    Ok(depth)
}

/// Executes the conversion and returns the path written.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &ConvertArgs) -> CliResult<PathBuf> {
    // 1. Load
    let document = match (&args.url, &args.input) {
        (Some(url), _) => fetch_document(url, &args.headers)?,
        (None, Some(path)) => read_document(path)?,
        (None, None) => {
            return Err(CliError::General(
                "Either --url or --input is required".to_string(),
            ))
        }
    };

    // 2. Convert
    let mut options = ConvertOptions::default().with_max_depth(args.max_depth);
    options.headers = args.headers.clone();
    options.source_url = args.url.clone();
    let conversion = convert_document(&document, options)?;

    // 3. Report
    log_report(&conversion.report);

    // 4. Write
    let output = serde_json::to_string_pretty(&conversion.collection)
        .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?;
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, output)?;

    Ok(args.output.clone())
}

fn log_report(report: &ConversionReport) {
    info!(operations = report.operations, "Converted operations");
    if report.parameter_fallbacks > 0 {
        warn!(
            count = report.parameter_fallbacks,
            "Some parameters used a placeholder value"
        );
    }
    if !report.circular_refs.is_empty() {
        info!(
            count = report.circular_refs.len(),
            "Found circular references"
        );
        for pointer in &report.circular_refs {
            info!("  - {}", pointer);
        }
    }
}
