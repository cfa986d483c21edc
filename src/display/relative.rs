//! Relative review timestamps ("il y a 3 jours")
//!
//! French wording, with the same thresholds the dashboard cards have always
//! used: minutes under 45, then hours, days under 30, months, then years.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone};

use crate::trends::daily::parse_timestamp;

/// Shown when a review has no usable timestamp
pub const NO_TIMESTAMP: &str = "\u{2014}";

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Distance between a stored timestamp and `now`, with a direction suffix
///
/// Past instants read `il y a ...`, future ones `dans ...`. A missing or
/// unparseable timestamp gives [`NO_TIMESTAMP`].
pub fn relative_time<Tz: TimeZone>(raw: Option<&str>, now: &DateTime<Tz>) -> String {
    let Some(at) = raw.and_then(|raw| parse_timestamp(raw, &now.timezone())) else {
        return NO_TIMESTAMP.to_string();
    };

    let (earlier, later, future) = if at > *now {
        (now.naive_local(), at.naive_local(), true)
    } else {
        (at.naive_local(), now.naive_local(), false)
    };

    let distance = format_distance(earlier, later);
    if future {
        format!("dans {}", distance)
    } else {
        format!("il y a {}", distance)
    }
}

fn format_distance(earlier: NaiveDateTime, later: NaiveDateTime) -> String {
    let seconds = (later - earlier).num_seconds();
    let minutes = round_div(seconds, 60);

    if minutes < 2 {
        return if minutes == 0 {
            "moins d\u{2019}une minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }
    if minutes < 45 {
        return format!("{} minutes", minutes);
    }
    if minutes < 90 {
        return "environ 1 heure".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        return format!("environ {} heures", round_div(minutes, 60));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 jour".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        return format!("{} jours", round_div(minutes, MINUTES_IN_DAY));
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return match round_div(minutes, MINUTES_IN_MONTH) {
            1 => "environ 1 mois".to_string(),
            n => format!("environ {} mois", n),
        };
    }

    let months = calendar_months(earlier, later);
    if months < 12 {
        return format!("{} mois", round_div(minutes, MINUTES_IN_MONTH));
    }

    let years = months / 12;
    match months % 12 {
        0..=2 if years == 1 => "environ 1 an".to_string(),
        0..=2 => format!("environ {} ans", years),
        3..=8 if years == 1 => "plus d\u{2019}un an".to_string(),
        3..=8 => format!("plus de {} ans", years),
        _ => format!("presque {} ans", years + 1),
    }
}

/// Whole calendar months from `earlier` to `later`
fn calendar_months(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    let mut months = (later.year() - earlier.year()) as i64 * 12 + later.month() as i64
        - earlier.month() as i64;
    if months > 0 && (later.day(), later.time()) < (earlier.day(), earlier.time()) {
        months -= 1;
    }
    months
}

/// Division rounded half up, for non-negative values
fn round_div(value: i64, divisor: i64) -> i64 {
    (value as f64 / divisor as f64).round() as i64
}
