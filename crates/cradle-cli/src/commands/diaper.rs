//! Diaper logging with stool-color triage.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use cradle_core::safety::{StoolStatus, assess_stool_color};
use cradle_core::{DiaperKind, clock};

use crate::CareService;

const fn status_label(status: StoolStatus) -> &'static str {
    match status {
        StoolStatus::Emergency => "emergency",
        StoolStatus::Warning => "warning",
        StoolStatus::Normal => "normal",
        StoolStatus::Unknown => "unknown",
    }
}

pub fn run<W: Write>(
    writer: &mut W,
    service: &mut CareService,
    kind: DiaperKind,
    color: Option<String>,
    notes: String,
    now: DateTime<Utc>,
) -> Result<()> {
    let event = service.log_diaper(kind, color, notes, now);
    writeln!(writer, "Diaper logged ({kind}).")?;

    // Triage needs an age; without a profile the color is recorded untriaged.
    if let (Some(color), Some(profile)) = (&event.poop_color, &service.snapshot().profile) {
        let age_days = clock::age_in_days(profile.birthdate, now);
        let assessment = assess_stool_color(color, age_days);
        writeln!(
            writer,
            "Stool check [{}]: {}",
            status_label(assessment.status),
            assessment.message
        )?;
        if let Some(action) = assessment.action {
            writeln!(writer, "  -> {action}")?;
        }
    }
    Ok(())
}
