//! Stool-color triage, hydration, fever, and breathing safety rules.
//!
//! Each rule is an explicit ordered list evaluated top-down, first match
//! wins. The emergency stool set always takes precedence because a color
//! string can substring-match more than one set.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::event::DiaperEvent;
use crate::types::{DiaperKind, Severity};

/// Triage outcome for a stool color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoolStatus {
    Emergency,
    Warning,
    Normal,
    Unknown,
}

/// The message attached to a stool triage result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoolAssessment {
    pub status: StoolStatus,
    pub message: &'static str,
    pub action: Option<&'static str>,
}

const EMERGENCY_COLORS: [&str; 3] = ["white", "red", "chalky"];
const WARNING_COLORS: [&str; 1] = ["black"];
const NORMAL_COLORS: [&str; 5] = ["mustard", "yellow", "tan", "brown", "green"];

fn matches_any(color: &str, set: &[&str]) -> bool {
    set.iter().any(|candidate| color.contains(candidate))
}

/// Triages a free-text stool color by case-insensitive substring match.
///
/// Black stool is only a warning after day 3 (meconium is black and normal
/// before that).
#[must_use]
pub fn assess_stool_color(color: &str, age_days: i64) -> StoolAssessment {
    let color = color.to_lowercase();

    if matches_any(&color, &EMERGENCY_COLORS) {
        return StoolAssessment {
            status: StoolStatus::Emergency,
            message: "Medical emergency. Consult a doctor immediately.",
            action: Some("Call the pediatrician or go to the ER now."),
        };
    }

    if matches_any(&color, &WARNING_COLORS) {
        if age_days > 3 {
            return StoolAssessment {
                status: StoolStatus::Warning,
                message: "Black stool after day 3 may indicate old blood.",
                action: Some("Consult your pediatrician."),
            };
        }
        // Meconium is black and expected in the first days.
        return StoolAssessment {
            status: StoolStatus::Normal,
            message: "Meconium-stage black stool is expected.",
            action: None,
        };
    }

    if matches_any(&color, &NORMAL_COLORS) {
        return StoolAssessment {
            status: StoolStatus::Normal,
            message: "Normal stool color.",
            action: None,
        };
    }

    StoolAssessment {
        status: StoolStatus::Unknown,
        message: "Unusual color. If concerned, consult your pediatrician.",
        action: Some("Monitor and document."),
    }
}

/// Counts diapers in the trailing 24 hours that were wet (or both).
#[must_use]
pub fn count_wet_diapers_24h(diaper_log: &[DiaperEvent], now: DateTime<Utc>) -> usize {
    let cutoff = now - Duration::hours(24);
    diaper_log
        .iter()
        .filter(|diaper| {
            diaper.timestamp > cutoff
                && matches!(diaper.kind, DiaperKind::Wet | DiaperKind::Both)
        })
        .count()
}

/// A safety rule finding, shaped for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyFinding {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub action: Option<String>,
}

/// Flags possible dehydration: fewer than 6 wet diapers in 24 hours, checked
/// only after day 5 (output ramps up over the first days).
#[must_use]
pub fn check_hydration(wet_count_24h: usize, age_days: i64) -> Option<SafetyFinding> {
    if age_days > 5 && wet_count_24h < 6 {
        return Some(SafetyFinding {
            severity: Severity::Warning,
            title: "Low wet diaper count".to_string(),
            message: format!(
                "Only {wet_count_24h} wet diapers in 24 hours. Baby may be dehydrated."
            ),
            action: Some(
                "Assess feeding efficiency. Contact the pediatrician if concerned.".to_string(),
            ),
        });
    }
    None
}

/// Fever threshold in Fahrenheit.
const FEVER_F: f64 = 100.4;

/// Checks a temperature reading. Under 90 days any fever is an emergency and
/// that branch always wins; otherwise a fever is a warning.
#[must_use]
pub fn check_fever(temp_f: f64, age_days: i64) -> Option<SafetyFinding> {
    if age_days < 90 && temp_f > FEVER_F {
        return Some(SafetyFinding {
            severity: Severity::Critical,
            title: "Medical emergency".to_string(),
            message: "A fever in a newborn under 3 months is a medical emergency.".to_string(),
            action: Some("Go to the ER immediately. Do not give medication yet.".to_string()),
        });
    }

    if temp_f > FEVER_F {
        return Some(SafetyFinding {
            severity: Severity::Warning,
            title: "Fever detected".to_string(),
            message: "Baby has a fever. Monitor closely.".to_string(),
            action: Some("Contact your pediatrician for guidance.".to_string()),
        });
    }

    None
}

const BREATHING_EMERGENCY_SYMPTOMS: [&str; 4] = [
    "blue lips",
    "struggling to breathe",
    "grunting",
    "flaring nostrils",
];

/// Checks a free-text symptom description for breathing emergencies.
#[must_use]
pub fn check_breathing(symptoms: &str) -> Option<SafetyFinding> {
    let symptoms = symptoms.to_lowercase();
    if matches_any(&symptoms, &BREATHING_EMERGENCY_SYMPTOMS) {
        return Some(SafetyFinding {
            severity: Severity::Critical,
            title: "Call emergency services immediately".to_string(),
            message: "Baby is showing signs of breathing difficulty.".to_string(),
            action: Some("Call emergency services (911/112) now.".to_string()),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn ts(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
            .single()
            .expect("valid test timestamp")
            + Duration::minutes(minutes)
    }

    fn diaper(kind: DiaperKind, at: DateTime<Utc>) -> DiaperEvent {
        DiaperEvent::new(kind, None, String::new(), at)
    }

    #[test]
    fn white_stool_is_emergency_at_any_age() {
        assert_eq!(
            assess_stool_color("white", 1).status,
            StoolStatus::Emergency
        );
        assert_eq!(
            assess_stool_color("Chalky grey", 60).status,
            StoolStatus::Emergency
        );
    }

    #[test]
    fn emergency_wins_over_other_matches() {
        // "reddish brown" matches both the emergency and normal sets.
        assert_eq!(
            assess_stool_color("reddish brown", 10).status,
            StoolStatus::Emergency
        );
    }

    #[test]
    fn black_stool_warning_gated_on_age() {
        // Meconium days: black is expected.
        assert_eq!(assess_stool_color("black", 2).status, StoolStatus::Normal);
        assert_eq!(assess_stool_color("black", 3).status, StoolStatus::Normal);
        assert_eq!(assess_stool_color("black", 10).status, StoolStatus::Warning);
    }

    #[test]
    fn normal_and_unknown_colors() {
        assert_eq!(
            assess_stool_color("Mustard yellow", 20).status,
            StoolStatus::Normal
        );
        assert_eq!(assess_stool_color("purple", 20).status, StoolStatus::Unknown);
        assert!(assess_stool_color("purple", 20).action.is_some());
    }

    #[test]
    fn meconium_black_has_reassuring_message() {
        let assessment = assess_stool_color("black", 2);
        assert_eq!(assessment.status, StoolStatus::Normal);
        assert!(assessment.action.is_none());
    }

    #[test]
    fn wet_diaper_count_filters_kind_and_window() {
        let now = ts(0);
        let log = vec![
            diaper(DiaperKind::Wet, now - Duration::hours(1)),
            diaper(DiaperKind::Both, now - Duration::hours(5)),
            diaper(DiaperKind::Dirty, now - Duration::hours(2)),
            diaper(DiaperKind::Wet, now - Duration::hours(25)),
        ];
        assert_eq!(count_wet_diapers_24h(&log, now), 2);
    }

    #[test]
    fn hydration_warning_needs_age_and_low_count() {
        assert!(check_hydration(5, 10).is_some());
        assert!(check_hydration(6, 10).is_none());
        // Age gate: no warning in the first five days.
        assert!(check_hydration(2, 4).is_none());
        assert!(check_hydration(2, 5).is_none());
        assert!(check_hydration(2, 6).is_some());
    }

    #[test]
    fn newborn_fever_is_critical() {
        let finding = check_fever(100.5, 30).expect("fever finding");
        assert_eq!(finding.severity, Severity::Critical);
    }

    #[test]
    fn older_baby_fever_is_warning() {
        let finding = check_fever(101.0, 120).expect("fever finding");
        assert_eq!(finding.severity, Severity::Warning);
    }

    #[test]
    fn no_fever_no_finding() {
        assert!(check_fever(100.4, 30).is_none());
        assert!(check_fever(98.6, 200).is_none());
    }

    #[test]
    fn breathing_symptoms_match_substring() {
        assert!(check_breathing("Lips look blue lips and grunting").is_some());
        assert!(check_breathing("GRUNTING sounds").is_some());
        assert!(check_breathing("sneezing and hiccups").is_none());
    }
}
