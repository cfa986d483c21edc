//! CSV export functionality
//!
//! Provides CSV serialization for the trend series and the review list.

use std::io::Write;
use std::path::Path;

use csv::Writer;
use serde::Serialize;

use super::{ExportError, ExportableReview, ExportableTrend};
use crate::display::ReviewView;
use crate::trends::TrendSeries;

/// Serialize records with a header row into any writer
fn write_records<W, T>(records: &[T], out: W) -> Result<(), ExportError>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(out);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the trend series, one row per day
pub fn write_trend_csv(trend: &TrendSeries, path: &Path) -> Result<(), ExportError> {
    let rows: Vec<ExportableTrend> = trend.points.iter().map(ExportableTrend::from).collect();
    let file = std::fs::File::create(path)?;
    write_records(&rows, file)
}

/// Write the review list, one row per review
pub fn write_reviews_csv(reviews: &[ReviewView], path: &Path) -> Result<(), ExportError> {
    let rows: Vec<ExportableReview> = reviews.iter().map(ExportableReview::from).collect();
    let file = std::fs::File::create(path)?;
    write_records(&rows, file)
}
