//! Sleep tracking commands.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use cradle_core::{SleepKind, clock};

use crate::CareService;

pub fn start<W: Write>(writer: &mut W, service: &mut CareService, now: DateTime<Utc>) -> Result<()> {
    service.start_sleep(now)?;
    writeln!(writer, "Sleep started.")?;
    Ok(())
}

pub fn end<W: Write>(
    writer: &mut W,
    service: &mut CareService,
    kind: SleepKind,
    now: DateTime<Utc>,
) -> Result<()> {
    let closed = service.end_sleep(kind, now)?;
    let duration = clock::format_duration(closed.duration_minutes.unwrap_or(0));
    writeln!(writer, "Sleep logged: {duration} ({kind}). Wake window open.")?;
    Ok(())
}

pub fn cancel<W: Write>(writer: &mut W, service: &mut CareService) -> Result<()> {
    service.cancel_sleep()?;
    writeln!(writer, "Active sleep discarded.")?;
    Ok(())
}
