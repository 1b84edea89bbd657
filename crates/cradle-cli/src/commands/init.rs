//! Init command for creating or replacing the baby profile.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use cradle_core::{BabyProfile, FeedingType, clock};

use crate::CareService;

pub fn run<W: Write>(
    writer: &mut W,
    service: &mut CareService,
    name: String,
    birthdate: NaiveDate,
    feeding_type: FeedingType,
    now: DateTime<Utc>,
) -> Result<()> {
    let age_days = clock::age_in_days(birthdate, now);
    let age_weeks = clock::age_in_weeks(birthdate, now);

    service.update_profile(BabyProfile {
        name: name.clone(),
        birthdate,
        feeding_type,
    });

    writeln!(
        writer,
        "Profile saved: {name}, born {birthdate}, feeding type {feeding_type}."
    )?;
    writeln!(writer, "{name} is {age_days} days old ({age_weeks} weeks).")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use cradle_db::Database;

    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn init_reports_profile_and_age() {
        let mut service = CareService::open(Database::open_in_memory().unwrap());
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let birthdate = NaiveDate::from_ymd_opt(2025, 2, 24).unwrap();

        let mut output = Vec::new();
        run(
            &mut output,
            &mut service,
            "Nour".to_string(),
            birthdate,
            FeedingType::Breast,
            now,
        )
        .unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Profile saved: Nour, born 2025-02-24, feeding type breast.
        Nour is 15 days old (2 weeks).
        ");
        assert!(service.snapshot().profile.is_some());
    }
}
