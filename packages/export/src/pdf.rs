//! Paginated PDF report rendering.
//!
//! Layout mirrors the dashboard's report: title, generation timestamp,
//! a statistics summary block in three columns, then the hazard table,
//! continuing onto fresh pages whenever the cursor reaches the bottom
//! margin. Coordinates are A4 millimetres measured from the bottom-left
//! corner.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Local};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use safelens_engine_models::HazardStats;
use safelens_hazard_models::Hazard;

use crate::ExportError;

/// Table column x positions in mm: ID, Type, Severity, Location, Status,
/// Time, Confidence.
fn columns() -> [Mm; 7] {
    [
        Mm(14.0),
        Mm(29.0),
        Mm(49.0),
        Mm(69.0),
        Mm(119.0),
        Mm(139.0),
        Mm(174.0),
    ]
}

fn document_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Document {
        message: e.to_string(),
    }
}

/// Writes the full paginated report to `path`.
pub fn write_report(
    hazards: &[Hazard],
    stats: &HazardStats,
    generated: DateTime<Local>,
    path: &Path,
) -> Result<(), ExportError> {
    let (doc, page, layer) = PdfDocument::new("SafeLens Report", Mm(210.0), Mm(297.0), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(document_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(document_error)?;

    let mut layer = doc.get_page(page).get_layer(layer);

    layer.use_text("SafeLens Report", 20.0, Mm(14.0), Mm(277.0), &bold);
    layer.use_text(
        format!("Generated: {}", generated.format("%B %d, %Y %H:%M")),
        10.0,
        Mm(14.0),
        Mm(269.0),
        &regular,
    );

    write_summary(&layer, stats, &bold, &regular);

    // Hazard table, six-millimetre rows, fresh page below the 20 mm
    // bottom margin.
    let mut y = Mm(222.0);
    write_table_header(&layer, y, &bold);
    y = y - Mm(6.0);

    for hazard in hazards {
        if y < Mm(20.0) {
            let (next_page, next_layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
            layer = doc.get_page(next_page).get_layer(next_layer);
            y = Mm(277.0);
            write_table_header(&layer, y, &bold);
            y = y - Mm(6.0);
        }
        write_row(&layer, y, hazard, &regular);
        y = y - Mm(6.0);
    }

    doc.save(&mut BufWriter::new(File::create(path)?))
        .map_err(document_error)
}

/// Renders the total/active/resolved, per-severity and per-type count
/// columns of the summary block.
fn write_summary(
    layer: &PdfLayerReference,
    stats: &HazardStats,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
) {
    layer.use_text("Summary Statistics", 14.0, Mm(14.0), Mm(257.0), bold);

    let blocks: [Vec<String>; 3] = [
        vec![
            format!("Total Hazards: {}", stats.total),
            format!("Active: {}", stats.active),
            format!("Resolved: {}", stats.resolved),
        ],
        vec![
            format!("Critical: {}", stats.by_severity.critical),
            format!("High: {}", stats.by_severity.high),
            format!("Medium: {}", stats.by_severity.medium),
            format!("Low: {}", stats.by_severity.low),
        ],
        vec![
            format!("Potholes: {}", stats.by_type.pothole),
            format!("Debris: {}", stats.by_type.debris),
            format!("Vehicles: {}", stats.by_type.vehicle),
        ],
    ];

    for (block, x) in blocks.iter().zip([Mm(14.0), Mm(80.0), Mm(140.0)]) {
        let mut y = Mm(249.0);
        for line in block {
            layer.use_text(line, 10.0, x, y, regular);
            y = y - Mm(6.0);
        }
    }
}

fn write_table_header(layer: &PdfLayerReference, y: Mm, bold: &IndirectFontRef) {
    let headers = [
        "ID",
        "Type",
        "Severity",
        "Location",
        "Status",
        "Time",
        "Confidence",
    ];
    for (text, x) in headers.iter().zip(columns()) {
        layer.use_text(*text, 8.0, x, y, bold);
    }
}

fn write_row(layer: &PdfLayerReference, y: Mm, hazard: &Hazard, regular: &IndirectFontRef) {
    let time = hazard
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();
    let confidence = format!("{:.1}%", hazard.confidence * 100.0);
    let cells = [
        hazard.id.as_str(),
        hazard.hazard_type.as_ref(),
        hazard.severity.as_ref(),
        hazard.location.as_str(),
        hazard.status.as_ref(),
        time.as_str(),
        confidence.as_str(),
    ];
    for (text, x) in cells.iter().zip(columns()) {
        layer.use_text(*text, 8.0, x, y, regular);
    }
}
