//! Glue between the engine, persistence, and reminder delivery.
//!
//! Every mutation writes through to the database best-effort: a failed save
//! is logged and the in-memory snapshot is kept, so the next mutation retries
//! the whole snapshot. Load failures fall back to an empty store.

use chrono::{DateTime, FixedOffset, Utc};

use cradle_core::{
    Alert, BabyProfile, CareStore, DiaperEvent, DiaperKind, FeedEvent, FeedKind, FeedSide,
    ReminderScheduler, SleepEvent, SleepKind, Snapshot, StateError, clock, evaluate,
};
use cradle_db::Database;

use crate::notify::LogDelivery;

/// Owns the store and re-arms reminders as wake and feed cycles change.
pub struct CareService {
    store: CareStore,
    db: Database,
    scheduler: ReminderScheduler<LogDelivery>,
}

impl CareService {
    /// Hydrates the service from the database. A failed load starts empty
    /// rather than failing; the engine must come up regardless.
    pub fn open(db: Database) -> Self {
        let snapshot = db.load().unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to load snapshot; starting empty");
            Snapshot::default()
        });
        Self {
            store: CareStore::from_snapshot(snapshot),
            db,
            scheduler: ReminderScheduler::new(LogDelivery),
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    /// Runs one alert evaluation pass against the current snapshot.
    #[must_use]
    pub fn alerts(&self, now_local: DateTime<FixedOffset>) -> Vec<Alert> {
        evaluate(self.store.snapshot(), now_local)
    }

    pub fn update_profile(&mut self, profile: BabyProfile) {
        self.store.update_profile(profile);
        self.persist();
    }

    pub fn start_feed(
        &mut self,
        kind: FeedKind,
        side: Option<FeedSide>,
        now: DateTime<Utc>,
    ) -> Result<FeedEvent, StateError> {
        let feed = self.store.start_feed(kind, side, now)?;
        self.persist();
        Ok(feed)
    }

    pub fn end_feed(
        &mut self,
        amount_ml: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<FeedEvent, StateError> {
        let closed = self.store.end_feed(amount_ml, now)?;
        let feeding_type = self.store.snapshot().profile.as_ref().map(|p| p.feeding_type);
        self.scheduler.on_feed_end(closed.start_time, feeding_type);
        self.persist();
        Ok(closed)
    }

    pub fn cancel_feed(&mut self) -> Result<(), StateError> {
        self.store.cancel_feed()?;
        self.persist();
        Ok(())
    }

    pub fn start_sleep(&mut self, now: DateTime<Utc>) -> Result<SleepEvent, StateError> {
        let sleep = self.store.start_sleep(now)?;
        self.scheduler.on_sleep_start();
        self.persist();
        Ok(sleep)
    }

    pub fn end_sleep(
        &mut self,
        kind: SleepKind,
        now: DateTime<Utc>,
    ) -> Result<SleepEvent, StateError> {
        let closed = self.store.end_sleep(kind, now)?;
        // Arm the wake-window reminders for the cycle that just opened.
        if let Some(profile) = &self.store.snapshot().profile {
            let age_weeks = clock::age_in_weeks(profile.birthdate, now);
            self.scheduler.on_sleep_end(now, age_weeks);
        }
        self.persist();
        Ok(closed)
    }

    pub fn cancel_sleep(&mut self) -> Result<(), StateError> {
        self.store.cancel_sleep()?;
        self.persist();
        Ok(())
    }

    pub fn log_diaper(
        &mut self,
        kind: DiaperKind,
        poop_color: Option<String>,
        notes: String,
        now: DateTime<Utc>,
    ) -> DiaperEvent {
        let event = self.store.log_diaper(kind, poop_color, notes, now);
        self.persist();
        event
    }

    /// Arms the recurring care reminders (vitamin D, safe-sleep review).
    /// Called once when a long-running session starts.
    pub fn arm_standing_reminders(&mut self) {
        self.scheduler.arm_standing_reminders();
    }

    /// Wipes memory and storage, and disarms any reminders.
    pub fn clear(&mut self) {
        self.store.clear();
        self.scheduler.on_sleep_start();
        if let Err(error) = self.db.clear() {
            tracing::warn!(%error, "failed to clear stored snapshot");
        }
    }

    /// Best-effort write-through; the snapshot stays in memory on failure.
    fn persist(&self) {
        if let Err(error) = self.db.save(self.store.snapshot()) {
            tracing::warn!(%error, "failed to persist snapshot; retaining in memory");
        }
    }
}
