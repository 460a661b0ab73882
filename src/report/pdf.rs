// src/report/pdf.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{error, info};

use super::{render_typst, Report, REPORT_FILE_NAME};
use crate::error::ExportError;

const SOURCE_FILE_NAME: &str = "job_recommendations.typ";

/// Compiles reports to PDF with the `typst` CLI
#[derive(Debug, Clone)]
pub struct PdfExporter {
    typst_bin: PathBuf,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self {
            typst_bin: PathBuf::from("typst"),
        }
    }
}

impl PdfExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_typst_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.typst_bin = bin.into();
        self
    }

    /// Write `job_recommendations.pdf` into `output_dir` and return its path
    pub fn export(&self, report: &Report, output_dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(output_dir)?;

        let workspace = tempfile::tempdir()?;
        let source_path = workspace.path().join(SOURCE_FILE_NAME);
        fs::write(&source_path, render_typst(report))?;

        let output_path = output_dir.join(REPORT_FILE_NAME);

        let output = Command::new(&self.typst_bin)
            .arg("compile")
            .arg(&source_path)
            .arg(&output_path)
            .output()
            .map_err(ExportError::TypstUnavailable)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            error!("Typst compilation failed: {}", stderr);
            return Err(ExportError::Typst(format!(
                "stderr={}, stdout={}",
                stderr.trim(),
                stdout.trim()
            )));
        }

        info!("Exported report to {}", output_path.display());
        Ok(output_path)
    }

    /// Write only the Typst source, for users without the typst CLI
    pub fn write_source(&self, report: &Report, output_dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(output_dir)?;
        let source_path = output_dir.join(SOURCE_FILE_NAME);
        fs::write(&source_path, render_typst(report))?;
        Ok(source_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportSection, SummarySource};
    use chrono::Utc;

    fn report() -> Report {
        Report {
            generated_at: Utc::now(),
            summary: "Summary".to_string(),
            summary_source: SummarySource::Model,
            sections: vec![ReportSection::from_jobs("Data", &[])],
        }
    }

    #[test]
    fn test_missing_typst_binary() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PdfExporter::new().with_typst_bin("/nonexistent/bin/typst");

        let err = exporter.export(&report(), dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::TypstUnavailable(_)));
        assert!(!dir.path().join(REPORT_FILE_NAME).exists());
    }

    #[test]
    fn test_write_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = PdfExporter::new()
            .write_source(&report(), &dir.path().join("out"))
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("== Jobs for Data:"));
        assert!(content.contains("No jobs found for this role."));
    }
}
