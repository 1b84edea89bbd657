//! Watch loop: periodic alert evaluation until interrupted.
//!
//! Evaluation is pure, so the cadence only affects how quickly a threshold
//! crossing is noticed. Each tick prints a fresh list; stale alerts simply
//! stop appearing.

use std::io::Write;

use anyhow::Result;
use chrono::Local;

use crate::CareService;
use crate::commands::alerts;

pub async fn run(service: &mut CareService, interval_secs: u64) -> Result<()> {
    let period = std::time::Duration::from_secs(interval_secs.max(1));
    let mut ticker = tokio::time::interval(period);
    tracing::info!(interval_secs, "watching for alerts; press Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now_local = Local::now().fixed_offset();
                let evaluated = service.alerts(now_local);
                tracing::debug!(count = evaluated.len(), "evaluated alerts");

                let stdout = std::io::stdout();
                let mut writer = stdout.lock();
                writeln!(writer, "-- {}", now_local.format("%Y-%m-%d %H:%M:%S"))?;
                alerts::render(&mut writer, &evaluated)?;
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::info!("watch loop stopped");
                return Ok(());
            }
        }
    }
}
