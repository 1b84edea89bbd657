//! Age and elapsed-time helpers.
//!
//! All functions take `now` explicitly so callers control the clock and the
//! results stay deterministic under test.
//!
//! Age rounding is asymmetric on purpose: days round *up* on a partial day
//! while weeks floor the day count divided by 7. Banding decisions downstream
//! depend on that exact behavior: any part of the first day counts as day 1,
//! but "1 week old" needs seven full days. The asymmetry can shift a band by
//! up to one day around milestones.

use chrono::{DateTime, NaiveDate, Utc};

const MINUTE_MS: i64 = 60 * 1000;
const DAY_MS: i64 = 24 * 60 * MINUTE_MS;

/// Age in days, rounding partial days up.
#[must_use]
pub fn age_in_days(birthdate: NaiveDate, now: DateTime<Utc>) -> i64 {
    let birth = birthdate.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    let elapsed_ms = (now - birth).num_milliseconds().abs();
    (elapsed_ms + DAY_MS - 1) / DAY_MS
}

/// Age in completed weeks (floor of the day count divided by 7).
#[must_use]
pub fn age_in_weeks(birthdate: NaiveDate, now: DateTime<Utc>) -> i64 {
    age_in_days(birthdate, now) / 7
}

/// Formats a minute count as `"45 min"` or `"1h 30m"`, dropping the minute
/// part when it is zero.
#[must_use]
pub fn format_duration(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}

/// Formats how long ago a timestamp was, e.g. `"Just now"`, `"5 min ago"`,
/// `"2h 10m ago"`, `"3 days ago"`.
#[must_use]
pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_mins = (now - timestamp).num_milliseconds() / MINUTE_MS;

    if diff_mins < 1 {
        return "Just now".to_string();
    }
    if diff_mins < 60 {
        return format!("{diff_mins} min ago");
    }

    let diff_hours = diff_mins / 60;
    if diff_hours < 24 {
        let mins = diff_mins % 60;
        return if mins > 0 {
            format!("{diff_hours}h {mins}m ago")
        } else {
            format!("{diff_hours}h ago")
        };
    }

    let diff_days = diff_hours / 24;
    let plural = if diff_days > 1 { "s" } else { "" };
    format!("{diff_days} day{plural} ago")
}
