//! Age-banded wake-window thresholds and remaining-time computation.

use chrono::{DateTime, Utc};

const MINUTE_MS: i64 = 60 * 1000;

/// Wake-window thresholds in minutes for one age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeWindow {
    /// Shortest comfortable wake window.
    pub min: i64,
    /// Longest safe wake window.
    pub max: i64,
    /// Minutes awake at which the warning fires.
    pub warning_at: i64,
}

/// Returns the wake-window band for an age in weeks.
///
/// Bands are closed-open on the lower bound: a 4-week-old is already in the
/// 60-90 band.
#[must_use]
pub const fn wake_window_minutes(age_weeks: i64) -> WakeWindow {
    if age_weeks < 4 {
        WakeWindow {
            min: 45,
            max: 60,
            warning_at: 45,
        }
    } else if age_weeks < 12 {
        WakeWindow {
            min: 60,
            max: 90,
            warning_at: 75,
        }
    } else if age_weeks < 16 {
        WakeWindow {
            min: 75,
            max: 90,
            warning_at: 75,
        }
    } else {
        WakeWindow {
            min: 90,
            max: 120,
            warning_at: 105,
        }
    }
}

/// How far into the current wake window the baby is.
#[derive(Debug, Clone, PartialEq)]
pub struct WakeWindowStatus {
    /// Whole minutes since the wake window opened.
    pub minutes_awake: i64,
    /// Minutes until the safe maximum; negative once past it.
    pub minutes_remaining: i64,
    /// The band in effect for this age.
    pub window: WakeWindow,
    /// Awake past the warning threshold.
    pub is_warning: bool,
    /// Awake past the safe maximum. Implies `is_warning`.
    pub is_urgent: bool,
    /// Minutes awake as a percentage of the maximum; exceeds 100 when urgent.
    pub percentage: f64,
}

/// Computes progress through the wake window that opened at `wake_time`.
///
/// Only meaningful while a wake window is open and the baby is not asleep;
/// the alert aggregator enforces that gate.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "minute counts are far below f64 precision limits"
)]
pub fn wake_window_remaining(
    wake_time: DateTime<Utc>,
    age_weeks: i64,
    now: DateTime<Utc>,
) -> WakeWindowStatus {
    let minutes_awake = (now - wake_time).num_milliseconds() / MINUTE_MS;
    let window = wake_window_minutes(age_weeks);

    WakeWindowStatus {
        minutes_awake,
        minutes_remaining: window.max - minutes_awake,
        window,
        is_warning: minutes_awake >= window.warning_at,
        is_urgent: minutes_awake >= window.max,
        percentage: minutes_awake as f64 / window.max as f64 * 100.0,
    }
}
