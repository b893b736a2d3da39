#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One-shot report generation over the currently filtered subset.
//!
//! The export surface is a closed set of formats ([`ExportFormat`])
//! sharing one contract: given the filtered subset and its derived
//! statistics, produce a downloadable artifact in the target directory.
//! Every export is terminal and one-shot; nothing is persisted beyond
//! the written file. An empty subset disables all formats — [`export`]
//! returns `Ok(None)` without touching the filesystem.

mod pdf;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use safelens_engine_models::HazardStats;
use safelens_hazard_models::Hazard;

/// Errors that can occur while generating an export artifact.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error (file write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendered artifact was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// PDF document generation failed.
    #[error("Document error: {message}")]
    Document {
        /// Description of what went wrong.
        message: String,
    },
}

/// The closed set of report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Spreadsheet listing of the filtered hazards.
    Csv,
    /// Pretty-printed statistics summary.
    Json,
    /// Paginated report with summary block and hazard table.
    Pdf,
}

impl ExportFormat {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Pdf]
    }

    /// Returns the artifact file name for an export dated `date`.
    #[must_use]
    pub fn file_name(self, date: NaiveDate) -> String {
        let date = date.format("%Y-%m-%d");
        match self {
            Self::Csv => format!("hazards-report-{date}.csv"),
            Self::Json => format!("hazards-stats-{date}.json"),
            Self::Pdf => format!("hazards-report-{date}.pdf"),
        }
    }
}

/// Generates one report artifact in `dir` and returns its path.
///
/// Returns `Ok(None)` without producing a file when the filtered subset
/// is empty: exports are not offered over nothing to report. The file
/// name is dated with the export moment's local date.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the file write fails.
pub fn export(
    format: ExportFormat,
    hazards: &[Hazard],
    stats: &HazardStats,
    dir: &Path,
) -> Result<Option<PathBuf>, ExportError> {
    if hazards.is_empty() {
        log::debug!("skipping {format:?} export: filtered subset is empty");
        return Ok(None);
    }

    let now = Local::now();
    let path = dir.join(format.file_name(now.date_naive()));

    match format {
        ExportFormat::Csv => std::fs::write(&path, csv_report(hazards)?)?,
        ExportFormat::Json => std::fs::write(&path, stats_json(stats)?)?,
        ExportFormat::Pdf => pdf::write_report(hazards, stats, now, &path)?,
    }

    log::info!("exported {} hazards to {}", hazards.len(), path.display());
    Ok(Some(path))
}

/// Renders the filtered subset as CSV with every field double-quoted.
///
/// # Errors
///
/// Returns [`ExportError`] if CSV serialization fails.
pub fn csv_report(hazards: &[Hazard]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record([
        "ID",
        "Type",
        "Severity",
        "Location",
        "Status",
        "Timestamp",
        "Confidence",
        "Reported By",
        "Description",
    ])?;

    for hazard in hazards {
        let timestamp = hazard
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let confidence = format_confidence(hazard.confidence);
        writer.write_record([
            hazard.id.as_str(),
            hazard.hazard_type.as_ref(),
            hazard.severity.as_ref(),
            hazard.location.as_str(),
            hazard.status.as_ref(),
            timestamp.as_str(),
            confidence.as_str(),
            hazard.reported_by.as_str(),
            hazard.description.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}

/// Renders the statistics summary as pretty-printed JSON (2-space
/// indent). The hazard list itself is not part of this artifact.
///
/// # Errors
///
/// Returns [`ExportError`] if JSON serialization fails.
pub fn stats_json(stats: &HazardStats) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(stats)?)
}

/// Renders a confidence in `[0, 1]` as a one-decimal percentage string.
fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
