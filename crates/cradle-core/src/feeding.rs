//! Feed-interval thresholds, feed-due computation, and cluster-feeding
//! detection.
//!
//! Cluster feeding and the witching hour are gated on the *local* wall-clock
//! hour, so those functions take a `DateTime<FixedOffset>`. Callers freeze
//! the device-local offset at call time (`Local::now().fixed_offset()`); a
//! timezone or DST change simply shifts later evaluations.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::event::FeedEvent;
use crate::types::FeedingType;

/// Feed-interval band in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedInterval {
    pub min_hours: f64,
    pub max_hours: f64,
}

/// Returns the interval band for a feeding type.
///
/// An unknown type (no profile yet) falls back to the breast band.
#[must_use]
pub fn feed_interval(feeding_type: Option<FeedingType>) -> FeedInterval {
    match feeding_type {
        Some(FeedingType::Formula) => FeedInterval {
            min_hours: 3.0,
            max_hours: 4.0,
        },
        Some(FeedingType::Mixed) => FeedInterval {
            min_hours: 2.0,
            max_hours: 3.5,
        },
        Some(FeedingType::Breast) | None => FeedInterval {
            min_hours: 2.0,
            max_hours: 3.0,
        },
    }
}

/// Whether the next feed is due, relative to the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDue {
    /// Hours elapsed since the last feed started.
    pub hours_since_last_feed: f64,
    /// Hours until the interval maximum; negative once overdue.
    pub hours_until_next_feed: f64,
    /// Past the interval maximum.
    pub is_due: bool,
    /// Within 30 minutes of the interval maximum.
    pub is_approaching: bool,
}

/// Computes feed-due state from the last feed time.
///
/// Only meaningful when no feed is currently active.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "elapsed milliseconds are far below f64 precision limits"
)]
pub fn next_feed_due(
    last_feed: DateTime<Utc>,
    feeding_type: Option<FeedingType>,
    now: DateTime<Utc>,
) -> FeedDue {
    let hours_since = (now - last_feed).num_milliseconds() as f64 / 3_600_000.0;
    let interval = feed_interval(feeding_type);

    FeedDue {
        hours_since_last_feed: hours_since,
        hours_until_next_feed: interval.max_hours - hours_since,
        is_due: hours_since >= interval.max_hours,
        is_approaching: hours_since >= interval.max_hours - 0.5,
    }
}

/// Detects an evening cluster-feeding pattern: 3+ feeds started within the
/// trailing 4 hours, checked only between 17:00 and 22:00 local time.
#[must_use]
pub fn detect_cluster_feeding(feed_log: &[FeedEvent], now_local: DateTime<FixedOffset>) -> bool {
    let hour = now_local.hour();
    if !(17..=21).contains(&hour) {
        return false;
    }

    let four_hours_ago = now_local.to_utc() - chrono::Duration::hours(4);
    let recent = feed_log
        .iter()
        .filter(|feed| feed.start_time > four_hours_ago)
        .count();

    recent >= 3
}

/// True during the evening fussiness band, 17:00-22:00 local time.
#[must_use]
pub fn is_witching_hour(now_local: DateTime<FixedOffset>) -> bool {
    let hour = now_local.hour();
    hour >= 17 && hour < 22
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use crate::types::FeedKind;

    use super::*;

    fn ts(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
            .single()
            .expect("valid test timestamp")
            + Duration::minutes(minutes)
    }

    /// A local time at the given hour, offset so local and UTC agree.
    fn local(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 3, 10, hour, minute, 0)
            .single()
            .expect("valid test timestamp")
    }

    fn closed_feed(start: DateTime<Utc>) -> FeedEvent {
        FeedEvent::start(FeedKind::Breast, None, start).close(None, start + Duration::minutes(15))
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "band constants are exact")]
    fn interval_bands_by_type() {
        assert_eq!(feed_interval(Some(FeedingType::Breast)).max_hours, 3.0);
        assert_eq!(feed_interval(Some(FeedingType::Formula)).min_hours, 3.0);
        assert_eq!(feed_interval(Some(FeedingType::Formula)).max_hours, 4.0);
        assert_eq!(feed_interval(Some(FeedingType::Mixed)).max_hours, 3.5);
        // Unknown falls back to the breast band.
        assert_eq!(feed_interval(None).max_hours, 3.0);
    }

    #[test]
    fn formula_feed_due_after_four_hours() {
        let due = next_feed_due(ts(0), Some(FeedingType::Formula), ts(246));
        assert!(due.is_due, "4.1 hours since last feed");
        assert!(due.is_approaching);
        assert!(due.hours_until_next_feed < 0.0);
    }

    #[test]
    fn approaching_half_hour_before_max() {
        // Breast band: max 3h, approaching from 2.5h.
        let early = next_feed_due(ts(0), Some(FeedingType::Breast), ts(140));
        assert!(!early.is_approaching);

        let approaching = next_feed_due(ts(0), Some(FeedingType::Breast), ts(155));
        assert!(approaching.is_approaching);
        assert!(!approaching.is_due);
    }

    #[test]
    fn cluster_feeding_needs_evening_hour() {
        let now = local(14, 0);
        let feeds: Vec<_> = (0..4)
            .map(|i| closed_feed(now.to_utc() - Duration::minutes(30 * i)))
            .collect();
        // Plenty of recent feeds, but it's 2 PM.
        assert!(!detect_cluster_feeding(&feeds, now));
        // Same log in the evening window trips the detector.
        let evening = local(18, 0);
        let feeds: Vec<_> = (0..4)
            .map(|i| closed_feed(evening.to_utc() - Duration::minutes(30 * i)))
            .collect();
        assert!(detect_cluster_feeding(&feeds, evening));
    }

    #[test]
    fn cluster_feeding_needs_three_recent_feeds() {
        let now = local(19, 0);
        let feeds = vec![
            closed_feed(now.to_utc() - Duration::minutes(30)),
            closed_feed(now.to_utc() - Duration::minutes(90)),
        ];
        assert!(!detect_cluster_feeding(&feeds, now));

        // A third feed outside the 4-hour window does not count.
        let mut feeds = feeds;
        feeds.push(closed_feed(now.to_utc() - Duration::hours(5)));
        assert!(!detect_cluster_feeding(&feeds, now));
    }

    #[test]
    fn cluster_window_boundaries() {
        let feeds_before = |now: DateTime<FixedOffset>| -> Vec<FeedEvent> {
            (1..=3)
                .map(|i| closed_feed(now.to_utc() - Duration::minutes(20 * i)))
                .collect()
        };
        for (hour, minute, expected) in [
            (17, 0, true),
            (21, 59, true),
            (16, 59, false),
            (22, 0, false),
        ] {
            let now = local(hour, minute);
            assert_eq!(
                detect_cluster_feeding(&feeds_before(now), now),
                expected,
                "at {hour:02}:{minute:02}"
            );
        }
    }

    #[test]
    fn witching_hour_band() {
        assert!(!is_witching_hour(local(16, 59)));
        assert!(is_witching_hour(local(17, 0)));
        assert!(is_witching_hour(local(21, 30)));
        assert!(!is_witching_hour(local(22, 0)));
    }
}
