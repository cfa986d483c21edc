//! Daily trend calculations
//!
//! Buckets reviews by local calendar day over a trailing window.

use std::collections::HashMap;

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Offset, TimeZone};

use super::{TrendPoint, TrendSeries};
use crate::models::review::ReviewRecord;

/// Placeholder counts shown for accounts with no reviews yet, oldest first
pub const DEMO_COUNTS: [u32; 7] = [6, 9, 7, 11, 10, 14, 12];

/// Timestamp formats with an offset that RFC 3339 parsing rejects,
/// such as Postgres' `2026-03-05 10:00:00.123+00`
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Timestamp formats without an offset, read as local time
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a stored timestamp into the given time zone
///
/// Handles formats like:
/// - "2026-03-05T10:30:00.000Z"
/// - "2026-03-05T10:30:00+01:00"
/// - "2026-03-05 10:30:00.123456+00"
/// - "2026-03-05T10:30:00" (local time)
/// - "2026-03-05" (local midnight)
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(tz));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return resolve_local(tz, &naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| resolve_local(tz, &naive))
}

/// Place a wall-clock time in `tz`
///
/// Ambiguous times take the earlier instant. Times skipped by a forward
/// clock change are read with the offset in effect before the change, which
/// moves them forward by the length of the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return Some(dt);
    }

    let before = naive.checked_sub_signed(ChronoDuration::days(1))?;
    let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
    let utc = naive.checked_sub_signed(ChronoDuration::seconds(offset.local_minus_utc() as i64))?;
    Some(tz.from_utc_datetime(&utc))
}

/// Local calendar day of a stored timestamp (start-of-day truncation)
pub fn local_day<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    parse_timestamp(raw, tz).map(|dt| dt.date_naive())
}

/// Local calendar day of a record, if its timestamp parses
pub fn record_day<Tz: TimeZone>(record: &ReviewRecord, tz: &Tz) -> Option<NaiveDate> {
    let day = record.created_at.as_deref().and_then(|raw| local_day(raw, tz));
    if day.is_none() {
        tracing::debug!(
            "Review {} has no usable timestamp ({:?}), excluding from date metrics",
            record.id,
            record.created_at
        );
    }
    day
}

/// The `window_days` days ending at `today`, oldest first
pub fn window_dates(today: NaiveDate, window_days: u32) -> Vec<NaiveDate> {
    (0..window_days as i64)
        .rev()
        .filter_map(|offset| today.checked_sub_signed(ChronoDuration::days(offset)))
        .collect()
}

/// Empty buckets for the window ending at `now`'s local day
fn empty_buckets<Tz: TimeZone>(now: &DateTime<Tz>, window_days: u32, label_format: &str) -> Vec<TrendPoint> {
    window_dates(now.date_naive(), window_days)
        .into_iter()
        .map(|date| TrendPoint::new(date, label_format))
        .collect()
}

/// Count reviews per local day over the trailing window ending at `now`
///
/// Buckets are keyed by calendar date, so the same day-and-month in two
/// different years never share a bucket. Records outside the window or
/// without a parseable timestamp are dropped.
pub fn build_trend<Tz: TimeZone>(
    records: &[ReviewRecord],
    now: &DateTime<Tz>,
    window_days: u32,
    label_format: &str,
) -> TrendSeries {
    let tz = now.timezone();
    let mut points = empty_buckets(now, window_days, label_format);

    let index: HashMap<NaiveDate, usize> = points
        .iter()
        .enumerate()
        .map(|(i, point)| (point.date, i))
        .collect();

    let mut outside = 0usize;
    for record in records {
        let Some(day) = record_day(record, &tz) else {
            continue;
        };
        match index.get(&day) {
            Some(&i) => points[i].count += 1,
            None => outside += 1,
        }
    }

    if outside > 0 {
        tracing::trace!("{} reviews fell outside the {}-day trend window", outside, window_days);
    }

    TrendSeries { points, demo: false }
}

/// Placeholder series for the window ending at `now`
///
/// Windows longer than the placeholder repeat it, aligned so today always
/// carries the last value.
pub fn demo_trend<Tz: TimeZone>(now: &DateTime<Tz>, window_days: u32, label_format: &str) -> TrendSeries {
    let mut points = empty_buckets(now, window_days, label_format);
    let len = points.len();
    let cycle = DEMO_COUNTS.len();

    for (i, point) in points.iter_mut().enumerate() {
        let from_end = len - 1 - i;
        point.count = DEMO_COUNTS[cycle - 1 - (from_end % cycle)];
    }

    TrendSeries { points, demo: true }
}
