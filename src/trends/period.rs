//! Period-over-period review counts
//!
//! Compares the number of reviews in a trailing period (ending today) with
//! the period of the same length immediately before it.

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, TimeZone};

use super::daily::record_day;
use super::PeriodChange;
use crate::models::review::ReviewRecord;

/// Inclusive day range `[start, end]`
fn period_bounds(today: NaiveDate, period_days: u32, periods_back: u32) -> Option<(NaiveDate, NaiveDate)> {
    let days = period_days as i64;
    let end = today.checked_sub_signed(ChronoDuration::days(days * periods_back as i64))?;
    let start = end.checked_sub_signed(ChronoDuration::days(days - 1))?;
    Some((start, end))
}

fn count_between(days: &[NaiveDate], bounds: Option<(NaiveDate, NaiveDate)>) -> u32 {
    match bounds {
        Some((start, end)) => days.iter().filter(|d| **d >= start && **d <= end).count() as u32,
        None => 0,
    }
}

/// Compute one [`PeriodChange`] per requested period length
///
/// Zero-length periods are skipped. Records without a parseable timestamp
/// do not count towards any period.
pub fn period_changes<Tz: TimeZone>(
    records: &[ReviewRecord],
    now: &DateTime<Tz>,
    periods: &[u32],
) -> Vec<PeriodChange> {
    let tz = now.timezone();
    let today = now.date_naive();
    let days: Vec<NaiveDate> = records.iter().filter_map(|r| record_day(r, &tz)).collect();

    periods
        .iter()
        .filter(|&&p| p > 0)
        .map(|&period_days| {
            let current = count_between(&days, period_bounds(today, period_days, 0));
            let previous = count_between(&days, period_bounds(today, period_days, 1));
            PeriodChange::new(period_days, current, previous)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    use crate::models::review::Sentiment;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 10, 18, 0, 0)
            .unwrap()
    }

    fn review(created_at: &str) -> ReviewRecord {
        ReviewRecord {
            id: created_at.to_string(),
            client_name: String::new(),
            text: String::new(),
            rating: 5.0,
            sentiment: Sentiment::Positive,
            created_at: Some(created_at.to_string()),
        }
    }

    #[test]
    fn test_period_bounds() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let (start, end) = period_bounds(today, 7, 0).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_eq!(end, today);

        let (start, end) = period_bounds(today, 7, 1).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 2, 25).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    }

    #[test]
    fn test_today_vs_yesterday() {
        let records = vec![
            review("2026-03-10T08:00:00Z"),
            review("2026-03-10T09:00:00Z"),
            review("2026-03-09T09:00:00Z"),
        ];

        let changes = period_changes(&records, &now(), &[1]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].current, 2);
        assert_eq!(changes[0].previous, 1);
        assert!((changes[0].change_percent - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_week_over_week() {
        let records = vec![
            review("2026-03-04T08:00:00Z"), // first day of current week
            review("2026-03-03T08:00:00Z"), // last day of previous week
            review("2026-02-25T08:00:00Z"), // first day of previous week
            review("2026-02-24T08:00:00Z"), // outside both
        ];

        let changes = period_changes(&records, &now(), &[7]);
        assert_eq!(changes[0].current, 1);
        assert_eq!(changes[0].previous, 2);
        assert!((changes[0].change_percent - (-50.0)).abs() < 0.001);
    }

    #[test]
    fn test_default_periods_and_zero_skipped() {
        let changes = period_changes(&[], &now(), &[1, 0, 7, 30]);
        let lengths: Vec<u32> = changes.iter().map(|c| c.period_days).collect();
        assert_eq!(lengths, vec![1, 7, 30]);
        assert!(changes.iter().all(|c| c.change_percent == 0.0));
    }

    #[test]
    fn test_unparseable_timestamps_ignored() {
        let records = vec![review("not a date"), review("2026-03-10T08:00:00Z")];
        let changes = period_changes(&records, &now(), &[1]);
        assert_eq!(changes[0].current, 1);
        assert_eq!(changes[0].previous, 0);
    }
}
