//! Reminder scheduling for wake windows and feeds.
//!
//! The engine only decides *when* and *what*: fire times and payloads are
//! handed to a [`ReminderDelivery`] implementation, and nothing is tracked
//! after that (fire-and-forget, no acknowledgement or retry). Each wake
//! cycle runs the state machine idle -> armed -> fired/cancelled; re-arming
//! always cancels the previous arm set first so a cycle can never deliver
//! duplicates.

use chrono::{DateTime, Duration, Utc};

use crate::feeding::feed_interval;
use crate::types::{FeedingType, Severity};
use crate::wake::wake_window_minutes;

/// What a delivered reminder should say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPayload {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

/// Recurrence for standing reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Every day at a local time of day.
    DailyAt { hour: u32, minute: u32 },
    /// Every fixed number of seconds.
    EverySeconds(u64),
}

/// External delivery mechanism for reminders.
///
/// Transport, permissions, and visibility are the implementer's concern.
pub trait ReminderDelivery {
    /// Cancels every reminder previously scheduled through this delivery.
    fn cancel_all(&mut self);

    /// Schedules a one-shot reminder at a future instant.
    fn schedule_at(&mut self, fire_at: DateTime<Utc>, payload: ReminderPayload);

    /// Delivers a reminder right away.
    fn schedule_immediate(&mut self, payload: ReminderPayload);

    /// Schedules a standing reminder.
    fn schedule_recurring(&mut self, cadence: Cadence, payload: ReminderPayload);
}

fn wake_warning_payload(warning_minutes: i64) -> ReminderPayload {
    ReminderPayload {
        title: "Wake window ending soon".to_string(),
        body: format!(
            "Baby has been up for {warning_minutes} mins. Look for sleepy cues \
             (staring off, rubbing eyes). Start the wind-down routine now."
        ),
        severity: Severity::Warning,
    }
}

fn wake_urgent_payload() -> ReminderPayload {
    ReminderPayload {
        title: "Max wake window reached".to_string(),
        body: "Sleep pressure is high. Offer a nap immediately to avoid overtiredness."
            .to_string(),
        severity: Severity::Critical,
    }
}

/// Arms and cancels reminders as wake and feed cycles open and close.
#[derive(Debug)]
pub struct ReminderScheduler<D: ReminderDelivery> {
    delivery: D,
    armed_wake: Option<DateTime<Utc>>,
}

impl<D: ReminderDelivery> ReminderScheduler<D> {
    /// Creates an idle scheduler over a delivery mechanism.
    pub const fn new(delivery: D) -> Self {
        Self {
            delivery,
            armed_wake: None,
        }
    }

    /// The wake-window anchor currently armed, if any.
    #[must_use]
    pub const fn armed_wake(&self) -> Option<DateTime<Utc>> {
        self.armed_wake
    }

    /// A sleep just ended: cancel the previous cycle's arm set, then arm the
    /// warning and urgent reminders for the wake window opening now.
    ///
    /// Idempotent per wake cycle: calling again for the same (or a new) wake
    /// time fully replaces the previous arm set.
    pub fn on_sleep_end(&mut self, wake_time: DateTime<Utc>, age_weeks: i64) {
        self.delivery.cancel_all();

        let window = wake_window_minutes(age_weeks);
        self.delivery.schedule_at(
            wake_time + Duration::minutes(window.warning_at),
            wake_warning_payload(window.warning_at),
        );
        self.delivery.schedule_at(
            wake_time + Duration::minutes(window.max),
            wake_urgent_payload(),
        );

        self.armed_wake = Some(wake_time);
    }

    /// A sleep just started: the wake cycle is over, cancel anything armed.
    pub fn on_sleep_start(&mut self) {
        if self.armed_wake.take().is_some() {
            self.delivery.cancel_all();
        }
    }

    /// A feed just closed: schedule the next-feed reminder at the interval
    /// maximum for the feeding type.
    pub fn on_feed_end(&mut self, last_feed: DateTime<Utc>, feeding_type: Option<FeedingType>) {
        let interval = feed_interval(feeding_type);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "interval maxima are a few hours, far within i64 minutes"
        )]
        let minutes = (interval.max_hours * 60.0).round() as i64;
        self.delivery.schedule_at(
            last_feed + Duration::minutes(minutes),
            ReminderPayload {
                title: "Feeding time".to_string(),
                body: format!(
                    "It's been {} hours since the last feed. Time to offer a feeding.",
                    interval.max_hours
                ),
                severity: Severity::Info,
            },
        );
    }

    /// Arms the standing daily reminders: vitamin D at 09:00 and a safe-sleep
    /// audit every 3 days.
    pub fn arm_standing_reminders(&mut self) {
        self.delivery.schedule_recurring(
            Cadence::DailyAt { hour: 9, minute: 0 },
            ReminderPayload {
                title: "Vitamin D time".to_string(),
                body: "Time for the daily vitamin D drop.".to_string(),
                severity: Severity::Info,
            },
        );
        self.delivery.schedule_recurring(
            Cadence::EverySeconds(3 * 24 * 60 * 60),
            ReminderPayload {
                title: "Safe sleep check".to_string(),
                body: "Quick check: crib should be empty. No blankets, no bumpers, no toys. \
                       Just baby on their back."
                    .to_string(),
                severity: Severity::Info,
            },
        );
    }

    /// Pushes an immediate, out-of-band reminder through the delivery.
    pub fn notify_now(&mut self, payload: ReminderPayload) {
        self.delivery.schedule_immediate(payload);
    }
}
