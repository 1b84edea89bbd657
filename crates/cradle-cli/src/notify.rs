//! Reminder delivery backed by the tracing log.
//!
//! Push transport is out of scope for the engine; this implementation records
//! what would have been delivered and when, which is also what the tests
//! inspect through log capture.

use chrono::{DateTime, Utc};

use cradle_core::{Cadence, ReminderDelivery, ReminderPayload};

/// Logs every delivery call instead of sending anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDelivery;

impl ReminderDelivery for LogDelivery {
    fn cancel_all(&mut self) {
        tracing::debug!("cancelled all scheduled reminders");
    }

    fn schedule_at(&mut self, fire_at: DateTime<Utc>, payload: ReminderPayload) {
        tracing::info!(
            fire_at = %fire_at,
            severity = %payload.severity,
            title = %payload.title,
            "reminder scheduled"
        );
    }

    fn schedule_immediate(&mut self, payload: ReminderPayload) {
        tracing::info!(
            severity = %payload.severity,
            title = %payload.title,
            body = %payload.body,
            "reminder delivered"
        );
    }

    fn schedule_recurring(&mut self, cadence: Cadence, payload: ReminderPayload) {
        tracing::info!(
            ?cadence,
            title = %payload.title,
            "recurring reminder scheduled"
        );
    }
}
