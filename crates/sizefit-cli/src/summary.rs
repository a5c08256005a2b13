//! Human-readable and JSON renderings of a run report.

use sizefit_core::{CompressionReport, Strategy};

/// One-line summary printed on success.
pub fn summarize(report: &CompressionReport) -> String {
    match (report.strategy, report.quality) {
        (Strategy::Searched, Some(quality)) => format!(
            "Image compressed to {} bytes with quality {}.",
            report.output_bytes, quality
        ),
        (Strategy::Reencoded, Some(quality)) => format!(
            "The image is already smaller than or equal to the maximum size. \
             Re-encoded to {} bytes with quality {}.",
            report.output_bytes, quality
        ),
        _ => format!(
            "The image is already smaller than or equal to the maximum size. \
             Copied {} bytes unchanged.",
            report.output_bytes
        ),
    }
}

pub fn to_json(report: &CompressionReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
