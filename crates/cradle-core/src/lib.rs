//! Core care-event and alerting engine for the infant tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - The event log: feed, sleep, and diaper records with active/closed
//!   lifecycles, owned by [`store::CareStore`]
//! - Derived state: ages, wake windows, feed intervals, cluster feeding
//! - Safety rules: stool-color triage, hydration, fever, breathing
//! - Alerting: the prioritized, deduplicated alert list in [`alert::evaluate`]
//! - Reminders: future-dated wake and feed reminders behind a delivery trait
//!
//! Everything here is deterministic and free of I/O: functions take the
//! clock as an argument and operate on in-memory snapshots.

pub mod alert;
pub mod clock;
pub mod event;
pub mod feeding;
pub mod reminder;
pub mod safety;
pub mod store;
pub mod types;
mod wake;

pub use alert::{Alert, AlertKind, evaluate};
pub use event::{BabyProfile, DiaperEvent, FeedEvent, SleepEvent, Snapshot};
pub use reminder::{Cadence, ReminderDelivery, ReminderPayload, ReminderScheduler};
pub use store::{CareStore, StateError};
pub use types::{
    DiaperKind, EventId, FeedKind, FeedSide, FeedingType, Severity, SleepKind, ValidationError,
};
pub use wake::{WakeWindow, WakeWindowStatus, wake_window_minutes, wake_window_remaining};
