//! Alert aggregation over the current snapshot.
//!
//! [`evaluate`] is pure and idempotent: it derives a fresh, ordered alert
//! list from the snapshot and the clock on every call, so it is safe to
//! drive from a periodic tick at any frequency. Alert ids are stable per
//! kind, which lets repeated evaluations replace rather than duplicate.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::clock::age_in_weeks;
use crate::event::Snapshot;
use crate::feeding::{detect_cluster_feeding, next_feed_due};
use crate::safety::{check_hydration, count_wet_diapers_24h};
use crate::types::Severity;
use crate::wake::wake_window_remaining;

/// The kind of an alert. Doubles as the stable alert id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    WakeUrgent,
    WakeWarning,
    ClusterFeed,
    FeedDue,
    Hydration,
}

impl AlertKind {
    /// Stable id string, shared by every instance of the kind.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::WakeUrgent => "wake-urgent",
            Self::WakeWarning => "wake-warning",
            Self::ClusterFeed => "cluster-feed",
            Self::FeedDue => "feed-due",
            Self::Hydration => "hydration",
        }
    }
}

/// One entry in the evaluated alert list. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Evaluates the full rule set against a snapshot.
///
/// Ordering is the urgency precedence: wake window first, then feeding,
/// then hydration. All matching alerts are surfaced. Without a profile the
/// list is empty; every rule is total over missing data.
#[must_use]
pub fn evaluate(snapshot: &Snapshot, now_local: DateTime<FixedOffset>) -> Vec<Alert> {
    let Some(profile) = &snapshot.profile else {
        return Vec::new();
    };

    let now = now_local.to_utc();
    let age_weeks = age_in_weeks(profile.birthdate, now);
    // Age gates here derive from whole weeks, matching the banding math.
    let age_days = age_weeks * 7;

    let mut alerts = Vec::new();

    // 1. Wake window, only while one is open and the baby is not asleep.
    if let (Some(wake_time), None) = (snapshot.current_wake_time, &snapshot.active_sleep) {
        let status = wake_window_remaining(wake_time, age_weeks, now);
        if status.is_urgent {
            alerts.push(Alert {
                kind: AlertKind::WakeUrgent,
                title: "Max wake window reached".to_string(),
                message: "Sleep pressure is high. Offer a nap immediately to avoid overtiredness."
                    .to_string(),
                severity: Severity::Critical,
                action: Some("Start sleep".to_string()),
            });
        } else if status.is_warning {
            alerts.push(Alert {
                kind: AlertKind::WakeWarning,
                title: "Wake window ending soon".to_string(),
                message: format!(
                    "Baby has been up for {} mins. Look for sleepy cues (staring off, \
                     rubbing eyes). Start the wind-down routine now.",
                    status.minutes_awake
                ),
                severity: Severity::Warning,
                action: Some("Start sleep".to_string()),
            });
        }
    }

    // 2. Feeding, only between feeds and once a first feed exists. Cluster
    //    feeding suppresses the generic due alert.
    if let (Some(last_feed), None) = (snapshot.last_feed(), &snapshot.active_feed) {
        let due = next_feed_due(last_feed.start_time, Some(profile.feeding_type), now);
        if due.is_due {
            if detect_cluster_feeding(&snapshot.feed_log, now_local) {
                alerts.push(Alert {
                    kind: AlertKind::ClusterFeed,
                    title: "Cluster feeding detected".to_string(),
                    message: "This looks like cluster feeding. It's normal and helps supply. \
                              Keep going, you're doing great."
                        .to_string(),
                    severity: Severity::Info,
                    action: None,
                });
            } else {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "whole feed-gap hours fit in i64"
                )]
                let hours = due.hours_since_last_feed.floor() as i64;
                alerts.push(Alert {
                    kind: AlertKind::FeedDue,
                    title: "Feeding time".to_string(),
                    message: format!("It's been {hours} hours since the last feed."),
                    severity: Severity::Info,
                    action: Some("Start feed".to_string()),
                });
            }
        }
    }

    // 3. Hydration, stateless.
    let wet_count = count_wet_diapers_24h(&snapshot.diaper_log, now);
    if let Some(finding) = check_hydration(wet_count, age_days) {
        alerts.push(Alert {
            kind: AlertKind::Hydration,
            title: finding.title,
            message: finding.message,
            severity: finding.severity,
            action: finding.action,
        });
    }

    alerts
}
