//! Feed tracking commands.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use cradle_core::{FeedKind, FeedSide, clock};

use crate::CareService;

pub fn start<W: Write>(
    writer: &mut W,
    service: &mut CareService,
    kind: FeedKind,
    side: Option<FeedSide>,
    now: DateTime<Utc>,
) -> Result<()> {
    service.start_feed(kind, side, now)?;
    match side {
        Some(side) => writeln!(writer, "Feed started ({kind}, {side} side).")?,
        None => writeln!(writer, "Feed started ({kind}).")?,
    }
    Ok(())
}

pub fn end<W: Write>(
    writer: &mut W,
    service: &mut CareService,
    amount_ml: Option<u32>,
    now: DateTime<Utc>,
) -> Result<()> {
    let closed = service.end_feed(amount_ml, now)?;
    let duration = clock::format_duration(closed.duration_minutes.unwrap_or(0));
    match closed.amount_ml {
        Some(ml) => writeln!(writer, "Feed logged: {duration}, {ml} ml.")?,
        None => writeln!(writer, "Feed logged: {duration}.")?,
    }
    Ok(())
}

pub fn cancel<W: Write>(writer: &mut W, service: &mut CareService) -> Result<()> {
    service.cancel_feed()?;
    writeln!(writer, "Active feed discarded.")?;
    Ok(())
}
