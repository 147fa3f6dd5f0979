use crate::core::charts::build_charts;
use crate::domain::model::{
    ProjectionInput, ProjectionReport, ReportFormat, INSUFFICIENT_DATA_WARNING,
};
use crate::utils::error::{ProjectionError, Result};
use chrono::Utc;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Runs the engine and assembles the report. Charts are only built for a real projection.
pub fn build_report(input: ProjectionInput) -> ProjectionReport {
    let result = input.project();
    let charts = result
        .as_ref()
        .map(|projection| build_charts(&input, projection))
        .unwrap_or_default();
    let warning = match result {
        Some(_) => None,
        None => Some(INSUFFICIENT_DATA_WARNING.to_string()),
    };

    ProjectionReport {
        input,
        result,
        charts,
        warning,
        generated_at: Utc::now(),
    }
}

/// Formats that can be produced for this report. Absent results only get JSON.
pub fn effective_formats(report: &ProjectionReport, requested: &[ReportFormat]) -> Vec<ReportFormat> {
    if report.is_projected() {
        requested.to_vec()
    } else {
        vec![ReportFormat::Json]
    }
}

pub fn render(report: &ProjectionReport, format: ReportFormat) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Csv => render_delimited(report, b','),
        ReportFormat::Tsv => render_delimited(report, b'\t'),
        ReportFormat::Json => Ok(serde_json::to_vec_pretty(report)?),
    }
}

fn render_delimited(report: &ProjectionReport, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["chart", "label", "value", "projection"])?;
    for series in &report.charts {
        for point in &series.points {
            let value = point.value.to_string();
            writer.write_record([
                series.title.as_str(),
                point.label.as_str(),
                value.as_str(),
                if point.projection { "true" } else { "false" },
            ])?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| ProjectionError::IoError(e.into_error()))
}

/// Packs already rendered files into a single zip archive.
pub fn build_archive(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
