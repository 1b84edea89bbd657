//! The in-memory care store: the single owner of the event log.
//!
//! Every mutation goes through [`CareStore`], which enforces the active-event
//! invariants: at most one active feed, at most one active sleep, and at most
//! one of {active sleep, open wake window} at a time. Persistence is the
//! caller's concern; the store only hands out snapshots.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::event::{BabyProfile, DiaperEvent, FeedEvent, SleepEvent, Snapshot};
use crate::types::{DiaperKind, FeedKind, FeedSide, SleepKind};

/// Guard errors for illegal state transitions. Callers treat these as
/// no-ops, never as fatal.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// A feed is already running; starting another would lose its start time.
    #[error("a feed is already active")]
    FeedActive,

    /// No feed is running to end or describes.
    #[error("no active feed")]
    NoActiveFeed,

    /// A sleep is already running.
    #[error("a sleep is already active")]
    SleepActive,

    /// No sleep is running.
    #[error("no active sleep")]
    NoActiveSleep,
}

/// Owns the snapshot and applies event-log state transitions.
#[derive(Debug, Default, Clone)]
pub struct CareStore {
    snapshot: Snapshot,
}

impl CareStore {
    /// Creates an empty store (no profile, no history).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a store from a previously persisted snapshot.
    #[must_use]
    pub const fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Sets or replaces the baby profile.
    pub fn update_profile(&mut self, profile: BabyProfile) {
        self.snapshot.profile = Some(profile);
    }

    /// Opens an active feed. Rejected while another feed is running.
    pub fn start_feed(
        &mut self,
        kind: FeedKind,
        side: Option<FeedSide>,
        now: DateTime<Utc>,
    ) -> Result<FeedEvent, StateError> {
        if self.snapshot.active_feed.is_some() {
            return Err(StateError::FeedActive);
        }
        let feed = FeedEvent::start(kind, side, now);
        self.snapshot.active_feed = Some(feed.clone());
        Ok(feed)
    }

    /// Closes the active feed and prepends it to the feed log.
    pub fn end_feed(
        &mut self,
        amount_ml: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<FeedEvent, StateError> {
        let active = self
            .snapshot
            .active_feed
            .take()
            .ok_or(StateError::NoActiveFeed)?;
        let closed = active.close(amount_ml, now);
        self.snapshot.feed_log.insert(0, closed.clone());
        Ok(closed)
    }

    /// Discards the active feed without logging it.
    pub fn cancel_feed(&mut self) -> Result<(), StateError> {
        self.snapshot
            .active_feed
            .take()
            .map(|_| ())
            .ok_or(StateError::NoActiveFeed)
    }

    /// Opens an active sleep and closes any open wake window.
    pub fn start_sleep(&mut self, now: DateTime<Utc>) -> Result<SleepEvent, StateError> {
        if self.snapshot.active_sleep.is_some() {
            return Err(StateError::SleepActive);
        }
        let sleep = SleepEvent::start(now);
        self.snapshot.active_sleep = Some(sleep.clone());
        self.snapshot.current_wake_time = None;
        Ok(sleep)
    }

    /// Closes the active sleep, logs it, and opens a wake window at `now`.
    pub fn end_sleep(
        &mut self,
        kind: SleepKind,
        now: DateTime<Utc>,
    ) -> Result<SleepEvent, StateError> {
        let active = self
            .snapshot
            .active_sleep
            .take()
            .ok_or(StateError::NoActiveSleep)?;
        let closed = active.close(kind, now);
        self.snapshot.sleep_log.insert(0, closed.clone());
        self.snapshot.current_wake_time = Some(now);
        Ok(closed)
    }

    /// Discards the active sleep without logging it or opening a wake window.
    pub fn cancel_sleep(&mut self) -> Result<(), StateError> {
        self.snapshot
            .active_sleep
            .take()
            .map(|_| ())
            .ok_or(StateError::NoActiveSleep)
    }

    /// Appends an atomic diaper record.
    pub fn log_diaper(
        &mut self,
        kind: DiaperKind,
        poop_color: Option<String>,
        notes: String,
        now: DateTime<Utc>,
    ) -> DiaperEvent {
        let event = DiaperEvent::new(kind, poop_color, notes, now);
        self.snapshot.diaper_log.insert(0, event.clone());
        event
    }

    /// Wipes all state: profile, logs, active slots, wake window.
    pub fn clear(&mut self) {
        self.snapshot = Snapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn ts(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0)
            .single()
            .expect("valid test timestamp")
            + Duration::minutes(minutes)
    }

    #[test]
    fn feed_lifecycle_start_end() {
        let mut store = CareStore::new();
        store
            .start_feed(FeedKind::Breast, Some(FeedSide::Left), ts(0))
            .unwrap();
        assert!(store.snapshot().active_feed.is_some());

        let closed = store.end_feed(Some(80), ts(20)).unwrap();
        assert_eq!(closed.duration_minutes, Some(20));
        assert_eq!(closed.amount_ml, Some(80));
        assert!(store.snapshot().active_feed.is_none());
        assert_eq!(store.snapshot().feed_log.len(), 1);
    }

    #[test]
    fn double_start_feed_is_rejected() {
        let mut store = CareStore::new();
        store.start_feed(FeedKind::Breast, None, ts(0)).unwrap();
        let original_start = store.snapshot().active_feed.as_ref().unwrap().start_time;

        let result = store.start_feed(FeedKind::Formula, None, ts(5));
        assert_eq!(result.unwrap_err(), StateError::FeedActive);
        // The original start time survives the rejected call.
        assert_eq!(
            store.snapshot().active_feed.as_ref().unwrap().start_time,
            original_start
        );
    }

    #[test]
    fn end_feed_without_active_is_state_error() {
        let mut store = CareStore::new();
        assert_eq!(store.end_feed(None, ts(0)).unwrap_err(), StateError::NoActiveFeed);
        assert!(store.snapshot().feed_log.is_empty());
    }

    #[test]
    fn cancel_feed_discards_without_logging() {
        let mut store = CareStore::new();
        store.start_feed(FeedKind::Formula, None, ts(0)).unwrap();
        store.cancel_feed().unwrap();
        assert!(store.snapshot().active_feed.is_none());
        assert!(store.snapshot().feed_log.is_empty());
    }

    #[test]
    fn sleep_end_opens_wake_window() {
        let mut store = CareStore::new();
        store.start_sleep(ts(0)).unwrap();
        assert!(store.snapshot().current_wake_time.is_none());

        let closed = store.end_sleep(SleepKind::Nap, ts(70)).unwrap();
        assert_eq!(closed.kind, Some(SleepKind::Nap));
        assert_eq!(closed.duration_minutes, Some(70));
        assert_eq!(store.snapshot().current_wake_time, Some(ts(70)));
    }

    #[test]
    fn sleep_start_closes_wake_window() {
        let mut store = CareStore::new();
        store.start_sleep(ts(0)).unwrap();
        store.end_sleep(SleepKind::Nap, ts(60)).unwrap();
        assert!(store.snapshot().current_wake_time.is_some());

        store.start_sleep(ts(120)).unwrap();
        // Only one of {active sleep, open wake window} may hold.
        assert!(store.snapshot().current_wake_time.is_none());
        assert!(store.snapshot().active_sleep.is_some());
    }

    #[test]
    fn cancel_sleep_keeps_wake_window_closed() {
        let mut store = CareStore::new();
        store.start_sleep(ts(0)).unwrap();
        store.cancel_sleep().unwrap();
        assert!(store.snapshot().active_sleep.is_none());
        assert!(store.snapshot().current_wake_time.is_none());
        assert!(store.snapshot().sleep_log.is_empty());
    }

    #[test]
    fn double_start_sleep_is_rejected() {
        let mut store = CareStore::new();
        store.start_sleep(ts(0)).unwrap();
        assert_eq!(store.start_sleep(ts(5)).unwrap_err(), StateError::SleepActive);
    }

    #[test]
    fn logs_are_reverse_chronological() {
        let mut store = CareStore::new();
        for i in 0..3 {
            store.start_feed(FeedKind::Breast, None, ts(i * 60)).unwrap();
            store.end_feed(None, ts(i * 60 + 15)).unwrap();
        }
        let log = &store.snapshot().feed_log;
        assert_eq!(log.len(), 3);
        assert!(log[0].start_time > log[1].start_time);
        assert!(log[1].start_time > log[2].start_time);
    }

    #[test]
    fn diaper_log_is_append_only_newest_first() {
        let mut store = CareStore::new();
        store.log_diaper(DiaperKind::Wet, None, String::new(), ts(0));
        store.log_diaper(
            DiaperKind::Dirty,
            Some("mustard".to_string()),
            "after feed".to_string(),
            ts(30),
        );
        let log = &store.snapshot().diaper_log;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].kind, DiaperKind::Dirty);
        assert_eq!(log[0].poop_color.as_deref(), Some("mustard"));
    }

    #[test]
    fn clear_wipes_everything() {
        let mut store = CareStore::new();
        store.start_sleep(ts(0)).unwrap();
        store.end_sleep(SleepKind::Night, ts(480)).unwrap();
        store.log_diaper(DiaperKind::Wet, None, String::new(), ts(490));
        store.clear();
        assert_eq!(store.snapshot(), &Snapshot::default());
    }
}
