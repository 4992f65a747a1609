//! Markdown report export.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use medivision_types::{HistoryEntry, InputMode};

use crate::error::AppResult;

const DEFAULT_EXPORT_PREFIX: &str = "MediVision_Analysis";

const EXPORT_DISCLAIMER: &str = "This is an AI-generated analysis for informational purposes only. \
It is not a medical diagnosis. Always consult a licensed medical professional.";

/// Fields that go into a report.
#[derive(Debug, Clone, Copy)]
pub struct ExportRecord<'a> {
    pub query: &'a str,
    pub response: &'a str,
    pub input_mode: InputMode,
    pub language: &'a str,
    pub model: &'a str,
    pub timestamp: DateTime<Local>,
}

impl<'a> From<&'a HistoryEntry> for ExportRecord<'a> {
    fn from(entry: &'a HistoryEntry) -> Self {
        Self {
            query: &entry.query,
            response: &entry.response,
            input_mode: entry.input_mode,
            language: &entry.language,
            model: &entry.model,
            timestamp: entry.timestamp,
        }
    }
}

pub fn format_export(record: &ExportRecord<'_>) -> String {
    format!(
        "# 🏥 MediVision Analysis Report\n\n\
         ## Metadata\n\n\
         - **Date:** {}\n\
         - **Model:** {}\n\
         - **Language:** {}\n\
         - **Input Mode:** {}\n\n\
         ## Query\n\n{}\n\n\
         ## Analysis\n\n{}\n\n\
         ---\n\n\
         ## ⚕️ Disclaimer\n\n{}\n",
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        record.model,
        record.language,
        record.input_mode,
        record.query,
        record.response.trim_end(),
        EXPORT_DISCLAIMER,
    )
}

/// `<prefix>_<YYYYMMDD_HHMMSS>.md`
pub fn export_filename(prefix: Option<&str>, at: DateTime<Local>) -> String {
    let prefix = prefix.map(str::trim).filter(|p| !p.is_empty()).unwrap_or(DEFAULT_EXPORT_PREFIX);
    format!("{}_{}.md", prefix, at.format("%Y%m%d_%H%M%S"))
}

/// Write a report. A directory target gets a generated file name.
pub fn write_export(target: &Path, prefix: Option<&str>, content: &str) -> AppResult<PathBuf> {
    let path = if target.is_dir() {
        target.join(export_filename(prefix, Local::now()))
    } else {
        target.to_path_buf()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)?;
    tracing::info!("[Export] Report written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 9, 7, 5, 1).unwrap()
    }

    fn record<'a>() -> ExportRecord<'a> {
        ExportRecord {
            query: "Persistent cough",
            response: "**General Insights:**\nLikely viral.\n",
            input_mode: InputMode::TextOnly,
            language: "English",
            model: "Gemini 2.5 Flash",
            timestamp: fixed_time(),
        }
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(None, fixed_time()), "MediVision_Analysis_20250309_070501.md");
        assert_eq!(export_filename(Some("MediVision_2"), fixed_time()), "MediVision_2_20250309_070501.md");
        assert_eq!(export_filename(Some("  "), fixed_time()), "MediVision_Analysis_20250309_070501.md");
    }

    #[test]
    fn test_format_export_sections() {
        let report = format_export(&record());
        assert!(report.starts_with("# 🏥 MediVision Analysis Report"));
        assert!(report.contains("- **Date:** 2025-03-09 07:05:01"));
        assert!(report.contains("- **Input Mode:** Text Only"));
        assert!(report.contains("## Query\n\nPersistent cough\n"));
        assert!(report.contains("## Analysis\n\n**General Insights:**\nLikely viral.\n\n---"));
        assert!(report.contains("consult a licensed medical professional"));
    }

    #[test]
    fn test_write_export_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(dir.path(), Some("Report"), "body").unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Report_") && name.ends_with(".md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "body");
    }

    #[test]
    fn test_write_export_to_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out.md");
        let path = write_export(&target, None, "body").unwrap();
        assert_eq!(path, target);
    }
}
