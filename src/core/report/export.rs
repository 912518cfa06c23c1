//! JSON export for analysis reports.
//!
//! Reports serialize to pretty-printed JSON so they can be archived or
//! handed to other tools unchanged.

use super::AnalysisReport;
use crate::error::ReportError;
use std::io::Write;
use std::path::Path;

/// Serialize a report to pretty-printed JSON.
pub fn to_json(report: &AnalysisReport) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(|e| ReportError::Serialization(e.to_string()))
}

/// Write a report as pretty-printed JSON to any writer.
pub fn write_json<W: Write>(report: &AnalysisReport, mut writer: W) -> Result<(), ReportError> {
    let json = to_json(report)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write a report to a JSON file.
pub fn export_to_file(report: &AnalysisReport, path: &Path) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|source| ReportError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = std::io::BufWriter::new(file);
    write_json(report, writer)
}
