//! Status command showing the profile, timers, and most recent events.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};

use cradle_core::feeding::{is_witching_hour, next_feed_due};
use cradle_core::{Snapshot, clock, wake_window_remaining};

pub fn run<W: Write>(
    writer: &mut W,
    snapshot: &Snapshot,
    now_local: DateTime<FixedOffset>,
) -> Result<()> {
    let Some(profile) = &snapshot.profile else {
        writeln!(writer, "No profile. Run `cradle init` first.")?;
        return Ok(());
    };

    let now = now_local.to_utc();
    let age_days = clock::age_in_days(profile.birthdate, now);
    let age_weeks = clock::age_in_weeks(profile.birthdate, now);

    writeln!(writer, "Baby: {}", profile.name)?;
    writeln!(writer, "Age: {age_days} days ({age_weeks} weeks)")?;
    writeln!(writer, "Feeding type: {}", profile.feeding_type)?;
    writeln!(writer)?;

    match (&snapshot.active_sleep, snapshot.current_wake_time) {
        (Some(sleep), _) => {
            writeln!(
                writer,
                "Sleeping now (started {})",
                clock::format_time_ago(sleep.start_time, now)
            )?;
        }
        (None, Some(wake_time)) => {
            let status = wake_window_remaining(wake_time, age_weeks, now);
            let awake = clock::format_duration(status.minutes_awake);
            if status.is_urgent {
                writeln!(
                    writer,
                    "Wake window: {awake} awake, {} past the limit (urgent)",
                    clock::format_duration(-status.minutes_remaining)
                )?;
            } else {
                let remaining = clock::format_duration(status.minutes_remaining);
                let tag = if status.is_warning { " (warning)" } else { "" };
                writeln!(writer, "Wake window: {awake} awake, {remaining} remaining{tag}")?;
            }
        }
        (None, None) => writeln!(writer, "Wake window: no sleep logged yet")?,
    }

    if let Some(feed) = &snapshot.active_feed {
        writeln!(
            writer,
            "Feeding now (started {})",
            clock::format_time_ago(feed.start_time, now)
        )?;
    } else if let Some(last) = snapshot.last_feed() {
        let due = next_feed_due(last.start_time, Some(profile.feeding_type), now);
        let ago = clock::format_time_ago(last.start_time, now);
        if due.is_due {
            writeln!(writer, "Last feed: {ago}, feed overdue")?;
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "minutes until the next feed fit in i64"
            )]
            let minutes = (due.hours_until_next_feed * 60.0).floor() as i64;
            writeln!(
                writer,
                "Last feed: {ago}, next due in {}",
                clock::format_duration(minutes)
            )?;
        }
    } else {
        writeln!(writer, "Last feed: none recorded")?;
    }

    if let Some(last) = snapshot.last_sleep() {
        let kind = last.kind.map_or("sleep", |k| k.as_str());
        let duration = clock::format_duration(last.duration_minutes.unwrap_or(0));
        let ended = last.end_time.unwrap_or(last.start_time);
        writeln!(
            writer,
            "Last sleep: {kind}, {duration}, ended {}",
            clock::format_time_ago(ended, now)
        )?;
    } else {
        writeln!(writer, "Last sleep: none recorded")?;
    }

    if let Some(last) = snapshot.diaper_log.first() {
        writeln!(
            writer,
            "Last diaper: {} ({})",
            clock::format_time_ago(last.timestamp, now),
            last.kind
        )?;
    } else {
        writeln!(writer, "Last diaper: none recorded")?;
    }

    if is_witching_hour(now_local) {
        writeln!(writer)?;
        writeln!(
            writer,
            "It's the witching hour. Extra fussiness in the evening is normal."
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone};

    use cradle_core::{
        BabyProfile, DiaperEvent, DiaperKind, FeedEvent, FeedKind, FeedingType, SleepEvent,
        SleepKind,
    };

    use insta::assert_snapshot;

    use super::*;

    /// Noon UTC at offset zero, so local and UTC agree.
    fn now_local() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
            .single()
            .expect("valid test timestamp")
    }

    fn profile() -> BabyProfile {
        BabyProfile {
            name: "Nour".to_string(),
            birthdate: NaiveDate::from_ymd_opt(2025, 2, 24).expect("valid date"),
            feeding_type: FeedingType::Breast,
        }
    }

    #[test]
    fn status_without_profile_points_at_init() {
        let mut output = Vec::new();
        run(&mut output, &Snapshot::default(), now_local()).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No profile. Run `cradle init` first.\n"
        );
    }

    #[test]
    fn status_renders_full_picture() {
        let now = now_local().to_utc();
        let wake_time = now - Duration::minutes(46);
        let sleep =
            SleepEvent::start(wake_time - Duration::minutes(70)).close(SleepKind::Nap, wake_time);
        let feed = FeedEvent::start(FeedKind::Breast, None, now - Duration::minutes(130))
            .close(None, now - Duration::minutes(115));
        let diaper = DiaperEvent::new(
            DiaperKind::Wet,
            None,
            String::new(),
            now - Duration::seconds(30),
        );

        let snapshot = Snapshot {
            profile: Some(profile()),
            feed_log: vec![feed],
            sleep_log: vec![sleep],
            diaper_log: vec![diaper],
            current_wake_time: Some(wake_time),
            ..Snapshot::default()
        };

        let mut output = Vec::new();
        run(&mut output, &snapshot, now_local()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Baby: Nour
        Age: 15 days (2 weeks)
        Feeding type: breast

        Wake window: 46 min awake, 14 min remaining (warning)
        Last feed: 2h 10m ago, next due in 50 min
        Last sleep: nap, 1h 10m, ended 46 min ago
        Last diaper: Just now (wet)
        ");
    }

    #[test]
    fn status_notes_the_witching_hour_in_the_evening() {
        let evening = FixedOffset::east_opt(0)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 3, 10, 18, 30, 0)
            .single()
            .expect("valid test timestamp");
        let snapshot = Snapshot {
            profile: Some(profile()),
            ..Snapshot::default()
        };

        let mut output = Vec::new();
        run(&mut output, &snapshot, evening).unwrap();
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("It's the witching hour."));
    }

    #[test]
    fn status_shows_active_timers() {
        let now = now_local().to_utc();
        let snapshot = Snapshot {
            profile: Some(profile()),
            active_feed: Some(FeedEvent::start(
                FeedKind::Breast,
                None,
                now - Duration::minutes(5),
            )),
            active_sleep: Some(SleepEvent::start(now - Duration::minutes(20))),
            ..Snapshot::default()
        };

        let mut output = Vec::new();
        run(&mut output, &snapshot, now_local()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Sleeping now (started 20 min ago)"));
        assert!(output.contains("Feeding now (started 5 min ago)"));
    }
}
