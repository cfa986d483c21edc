//! Export module for CSV and JSON export functionality
//!
//! Writes the computed dashboard, its trend series, and the review list
//! to files.

pub mod csv_export;
pub mod json_export;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::ReviewView;
use crate::models::review::Sentiment;
use crate::trends::TrendPoint;

/// Longest review text kept in exported rows, in characters
pub const TEXT_PREVIEW_CHARS: usize = 100;

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Exportable trend row for CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportableTrend {
    pub date: String,
    pub label: String,
    pub review_count: u32,
}

impl From<&TrendPoint> for ExportableTrend {
    fn from(point: &TrendPoint) -> Self {
        Self {
            date: point.date.format("%Y-%m-%d").to_string(),
            label: point.date_label.clone(),
            review_count: point.count,
        }
    }
}

/// Exportable review row for CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportableReview {
    pub review_id: String,
    pub created_at: Option<String>,
    pub client_name: String,
    pub rating: f64,
    pub sentiment: Sentiment,
    pub text_preview: String,
}

impl From<&ReviewView> for ExportableReview {
    fn from(review: &ReviewView) -> Self {
        Self {
            review_id: review.id.clone(),
            created_at: review.created_at.clone(),
            client_name: review.client_name.clone(),
            rating: review.rating,
            sentiment: review.sentiment,
            text_preview: preview(&review.text),
        }
    }
}

/// Truncate text to [`TEXT_PREVIEW_CHARS`] characters, marking the cut with `...`
fn preview(text: &str) -> String {
    if text.chars().count() > TEXT_PREVIEW_CHARS {
        let head: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Get the default export directory (Downloads folder or temp dir)
pub fn get_export_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(std::env::temp_dir)
}

/// Generate a timestamped filename for exports
pub fn generate_export_filename(prefix: &str, format: ExportFormat) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", prefix, timestamp, format.extension())
}

/// The given path, or a timestamped file in the export directory
pub fn resolve_export_path(explicit: Option<&Path>, prefix: &str, format: ExportFormat) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => get_export_directory().join(generate_export_filename(prefix, format)),
    }
}

pub use csv_export::*;
pub use json_export::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
    }

    #[test]
    fn test_generate_export_filename() {
        let filename = generate_export_filename("trend", ExportFormat::Csv);
        assert!(filename.starts_with("trend_"));
        assert!(filename.ends_with(".csv"));
    }

    #[test]
    fn test_resolve_export_path() {
        let explicit = Path::new("/tmp/reviews.csv");
        assert_eq!(
            resolve_export_path(Some(explicit), "reviews", ExportFormat::Csv),
            explicit
        );

        let default = resolve_export_path(None, "review_dashboard", ExportFormat::Json);
        assert_eq!(default.parent(), Some(get_export_directory().as_path()));
        let name = default.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("review_dashboard_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_exportable_trend_from_point() {
        let mut point = TrendPoint::new(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(), "%d %b");
        point.count = 3;

        let row = ExportableTrend::from(&point);
        assert_eq!(row.date, "2026-03-05");
        assert_eq!(row.label, "05 Mar");
        assert_eq!(row.review_count, 3);
    }

    #[test]
    fn test_preview_truncates_on_characters() {
        let short = "Très bien";
        assert_eq!(preview(short), short);

        let long = "é".repeat(150);
        let cut = preview(&long);
        assert_eq!(cut.chars().count(), TEXT_PREVIEW_CHARS + 3);
        assert!(cut.ends_with("..."));
    }
}
