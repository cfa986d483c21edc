//! Trend analysis module
//!
//! This module handles time-bucketed review activity:
//! - Trailing-window daily review counts for the activity chart
//! - Period-over-period review count comparisons
//! - A placeholder series for accounts without reviews

pub mod daily;
pub mod period;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of days in the trend window
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Default strftime format for day labels, e.g. `05 Mar`
pub const DEFAULT_LABEL_FORMAT: &str = "%d %b";

/// One day of review activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Calendar day the bucket covers; the bucket key
    pub date: NaiveDate,
    /// Display label for the day
    pub date_label: String,
    /// Number of reviews created that day
    pub count: u32,
}

impl TrendPoint {
    /// Create an empty bucket for a day
    pub fn new(date: NaiveDate, label_format: &str) -> Self {
        Self {
            date,
            date_label: format_day_label(date, label_format),
            count: 0,
        }
    }
}

/// Fixed-length daily series, oldest day first, ending today
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
    /// True when the counts are placeholder values rather than real reviews
    #[serde(default)]
    pub demo: bool,
}

impl TrendSeries {
    /// Total reviews counted across all buckets
    pub fn total(&self) -> u32 {
        self.points.iter().map(|p| p.count).sum()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Review count over a trailing period compared with the period just before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodChange {
    /// Length of each period in days; `1` means today vs yesterday
    pub period_days: u32,
    pub current: u32,
    pub previous: u32,
    /// Positive = more reviews than the previous period
    pub change_percent: f64,
}

impl PeriodChange {
    pub fn new(period_days: u32, current: u32, previous: u32) -> Self {
        let change_percent = if previous > 0 {
            ((current as f64 - previous as f64) / previous as f64) * 100.0
        } else if current > 0 {
            100.0 // Reviews where there were none before
        } else {
            0.0
        };

        Self {
            period_days,
            current,
            previous,
            change_percent,
        }
    }
}

/// Check that a strftime format string can be rendered without error
pub fn is_valid_label_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| item == Item::Error)
}

/// Format a day label, falling back to the default format when `format` is invalid
pub fn format_day_label(date: NaiveDate, format: &str) -> String {
    let format = if is_valid_label_format(format) {
        format
    } else {
        DEFAULT_LABEL_FORMAT
    };
    date.format(format).to_string()
}
