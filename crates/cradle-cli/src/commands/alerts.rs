//! Alerts command: one evaluation pass, printed.

use std::io::Write;

use anyhow::Result;

use cradle_core::Alert;

/// Renders an evaluated alert list, most urgent first.
pub fn render<W: Write>(writer: &mut W, alerts: &[Alert]) -> Result<()> {
    if alerts.is_empty() {
        writeln!(writer, "No alerts.")?;
        return Ok(());
    }

    for alert in alerts {
        writeln!(writer, "[{}] {}", alert.severity, alert.title)?;
        writeln!(writer, "  {}", alert.message)?;
        if let Some(action) = &alert.action {
            writeln!(writer, "  -> {action}")?;
        }
    }
    Ok(())
}
