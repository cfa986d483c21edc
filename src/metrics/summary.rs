//! Summary statistics over an account's reviews
//!
//! Totals, average rating, share of positive ratings, and the optional
//! count of reviews created since the start of the current month.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::rating::POSITIVE_THRESHOLD;
use crate::models::review::ReviewRecord;
use crate::trends::daily::record_day;

/// Headline review statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_reviews: u32,
    /// Mean rating; unknown (`0`) ratings count towards the denominator
    pub average_rating: Option<f64>,
    /// Share of reviews rated 4 or more, 0-100
    pub positive_percentage: Option<f64>,
    /// Present only when the month metric is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_this_month: Option<u32>,
}

impl AnalyticsSummary {
    /// Summary for an account without reviews
    pub fn empty(include_month: bool) -> Self {
        Self {
            total_reviews: 0,
            average_rating: None,
            positive_percentage: None,
            reviews_this_month: include_month.then_some(0),
        }
    }
}

/// First calendar day of the month containing `today`
pub fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// Aggregate summary statistics in a single pass
///
/// The result does not depend on the order of `records`.
pub fn build_summary<Tz: TimeZone>(
    records: &[ReviewRecord],
    now: &DateTime<Tz>,
    include_month: bool,
) -> AnalyticsSummary {
    let total = records.len();
    if total == 0 {
        return AnalyticsSummary::empty(include_month);
    }

    let tz = now.timezone();
    let first_of_month = month_start(now.date_naive());

    let mut rating_sum = 0.0;
    let mut positive_count = 0u32;
    let mut this_month = 0u32;

    for record in records {
        rating_sum += record.rating;
        if record.rating >= POSITIVE_THRESHOLD {
            positive_count += 1;
        }
        if include_month {
            if let Some(day) = record_day(record, &tz) {
                if day >= first_of_month {
                    this_month += 1;
                }
            }
        }
    }

    AnalyticsSummary {
        total_reviews: total as u32,
        average_rating: Some(rating_sum / total as f64),
        positive_percentage: Some((positive_count as f64 / total as f64) * 100.0),
        reviews_this_month: include_month.then_some(this_month),
    }
}
