//! Care events and the persisted snapshot shape.
//!
//! Feed and sleep events share an active/closed lifecycle: they are created
//! with a `start_time` only and closed by filling in `end_time` plus the
//! computed duration. Diaper events are atomic records with no lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DiaperKind, EventId, FeedKind, FeedSide, FeedingType, SleepKind};

/// The baby's profile, created at onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabyProfile {
    pub name: String,
    pub birthdate: NaiveDate,
    pub feeding_type: FeedingType,
}

/// A single feed, active until `end_time` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub id: EventId,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub kind: FeedKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<FeedSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_ml: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
}

impl FeedEvent {
    /// Opens a new active feed starting now.
    #[must_use]
    pub fn start(kind: FeedKind, side: Option<FeedSide>, now: DateTime<Utc>) -> Self {
        Self {
            id: EventId::generate(),
            start_time: now,
            end_time: None,
            kind,
            side,
            amount_ml: None,
            duration_minutes: None,
        }
    }

    /// Closes the feed, recording the end time and computed duration.
    ///
    /// The duration is clamped at zero if the clock moved backwards.
    #[must_use]
    pub fn close(mut self, amount_ml: Option<u32>, now: DateTime<Utc>) -> Self {
        self.end_time = Some(now);
        self.amount_ml = amount_ml;
        self.duration_minutes = Some((now - self.start_time).num_minutes().max(0));
        self
    }
}

/// A sleep, active until `end_time` is set.
///
/// The kind (nap or night) is chosen when the sleep ends, so it is absent on
/// the active record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepEvent {
    pub id: EventId,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SleepKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
}

impl SleepEvent {
    /// Opens a new active sleep starting now.
    #[must_use]
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            id: EventId::generate(),
            start_time: now,
            end_time: None,
            kind: None,
            duration_minutes: None,
        }
    }

    /// Closes the sleep as the given kind.
    #[must_use]
    pub fn close(mut self, kind: SleepKind, now: DateTime<Utc>) -> Self {
        self.end_time = Some(now);
        self.kind = Some(kind);
        self.duration_minutes = Some((now - self.start_time).num_minutes().max(0));
        self
    }
}

/// An atomic diaper record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaperEvent {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub kind: DiaperKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poop_color: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl DiaperEvent {
    /// Creates a new diaper record timestamped now.
    #[must_use]
    pub fn new(
        kind: DiaperKind,
        poop_color: Option<String>,
        notes: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::generate(),
            timestamp: now,
            kind,
            poop_color,
            notes,
        }
    }
}

/// The full persisted state: profile, the three logs (newest first), the two
/// active-event slots, and the open wake window anchor.
///
/// `current_wake_time` is present iff the baby is awake and a sleep has
/// previously ended. At most one of {active sleep, open wake window} holds
/// at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<BabyProfile>,
    #[serde(default)]
    pub feed_log: Vec<FeedEvent>,
    #[serde(default)]
    pub sleep_log: Vec<SleepEvent>,
    #[serde(default)]
    pub diaper_log: Vec<DiaperEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_feed: Option<FeedEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_sleep: Option<SleepEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_wake_time: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// The most recent closed feed, if any.
    #[must_use]
    pub fn last_feed(&self) -> Option<&FeedEvent> {
        self.feed_log.first()
    }

    /// The most recent closed sleep, if any.
    #[must_use]
    pub fn last_sleep(&self) -> Option<&SleepEvent> {
        self.sleep_log.first()
    }
}
