//! Clear command: wipe the profile and all logged events.

use std::io::Write;

use anyhow::Result;

use crate::CareService;

pub fn run<W: Write>(writer: &mut W, service: &mut CareService) -> Result<()> {
    service.clear();
    writeln!(writer, "All data cleared.")?;
    Ok(())
}
