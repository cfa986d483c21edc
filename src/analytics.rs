//! Review analytics
//!
//! [`ReviewAnalytics`] turns an account's review rows into everything the
//! dashboard shows. The computation is pure: "now" and its time zone are
//! passed in, so the same rows and the same instant always give the same
//! [`Dashboard`].

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::config::{AnalyticsConfig, ConfigError};
use crate::display::ReviewView;
use crate::metrics::sentiment::SentimentBreakdown;
use crate::metrics::summary::{build_summary, AnalyticsSummary};
use crate::models::review::{normalize_rows, RawReviewRow, ReviewRecord};
use crate::trends::daily::{build_trend, demo_trend};
use crate::trends::period::period_changes;
use crate::trends::{PeriodChange, TrendSeries};

/// Everything the dashboard page renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// The injected "now", RFC 3339
    pub generated_at: String,
    pub summary: AnalyticsSummary,
    pub trend: TrendSeries,
    pub sentiment: SentimentBreakdown,
    pub period_changes: Vec<PeriodChange>,
    /// Reviews in input order
    pub reviews: Vec<ReviewView>,
}

/// Configured review analytics
#[derive(Debug, Clone, Default)]
pub struct ReviewAnalytics {
    config: AnalyticsConfig,
}

impl ReviewAnalytics {
    /// Analytics over a validated config
    pub fn new(config: AnalyticsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Normalize storage rows into records
    pub fn normalize(&self, rows: &[RawReviewRow]) -> Vec<ReviewRecord> {
        normalize_rows(rows, self.config.unknown_rating)
    }

    pub fn summary<Tz: TimeZone>(&self, records: &[ReviewRecord], now: &DateTime<Tz>) -> AnalyticsSummary {
        build_summary(records, now, self.config.include_reviews_this_month)
    }

    /// Daily review counts over the configured window
    ///
    /// Falls back to the placeholder series for an empty account when
    /// `demo_trend_when_empty` is set.
    pub fn trend<Tz: TimeZone>(&self, records: &[ReviewRecord], now: &DateTime<Tz>) -> TrendSeries {
        if records.is_empty() && self.config.demo_trend_when_empty {
            return demo_trend(now, self.config.window_days, &self.config.label_format);
        }
        build_trend(records, now, self.config.window_days, &self.config.label_format)
    }

    pub fn sentiment_breakdown(&self, records: &[ReviewRecord]) -> SentimentBreakdown {
        SentimentBreakdown::from_records(records)
    }

    pub fn period_changes<Tz: TimeZone>(&self, records: &[ReviewRecord], now: &DateTime<Tz>) -> Vec<PeriodChange> {
        period_changes(records, now, &self.config.comparison_periods)
    }

    /// Compute the full dashboard at a given instant
    pub fn dashboard<Tz>(&self, rows: &[RawReviewRow], now: &DateTime<Tz>) -> Dashboard
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let records = self.normalize(rows);

        let dashboard = Dashboard {
            generated_at: now.to_rfc3339(),
            summary: self.summary(&records, now),
            trend: self.trend(&records, now),
            sentiment: self.sentiment_breakdown(&records),
            period_changes: self.period_changes(&records, now),
            reviews: records.iter().map(|record| ReviewView::new(record, now)).collect(),
        };

        tracing::debug!(
            "Computed dashboard: {} reviews, {} in trend window",
            dashboard.summary.total_reviews,
            dashboard.trend.total()
        );

        dashboard
    }

    /// Compute the dashboard against the system clock in local time
    pub fn dashboard_now(&self, rows: &[RawReviewRow]) -> Dashboard {
        self.dashboard(rows, &Local::now())
    }
}
