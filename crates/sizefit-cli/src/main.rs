//! `sizefit` - compress one image to fit under a size ceiling.
//!
//! Logs go to stderr (filter with `RUST_LOG`); the result line or the error
//! goes to stdout.

mod cli;
mod summary;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sizefit_core::Compressor;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{extension_mismatch, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();
    debug!(?args, "parsed arguments");

    let (line, code) = render(run(&args));
    println!("{line}");
    code
}

/// Stdout line and exit code for a finished run.
fn render(outcome: Result<String>) -> (String, ExitCode) {
    match outcome {
        Ok(message) => (message, ExitCode::SUCCESS),
        Err(e) => (format!("Error: {e:#}"), ExitCode::FAILURE),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: &Args) -> Result<String> {
    let report = Compressor::new()
        .with_config(args.search_config())
        .compress(&args.request())
        .with_context(|| format!("failed to compress {}", args.input.display()))?;

    if extension_mismatch(&report.output, report.format) {
        warn!(
            output = %report.output.display(),
            format = %report.format,
            "output file name does not match the encoded format"
        );
    }

    if args.json {
        summary::to_json(&report).context("failed to serialize report")
    } else {
        Ok(summary::summarize(&report))
    }
}
