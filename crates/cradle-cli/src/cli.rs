//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use cradle_core::{DiaperKind, FeedKind, FeedSide, FeedingType, SleepKind};

/// Infant care tracker.
///
/// Records feeding, sleep, and diaper events for one baby and derives
/// wake-window countdowns, feed-due reminders, and safety checks from them.
#[derive(Debug, Parser)]
#[command(name = "cradle", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or update the baby profile.
    Init {
        /// The baby's name.
        #[arg(long)]
        name: String,

        /// Birthdate as YYYY-MM-DD.
        #[arg(long)]
        birthdate: NaiveDate,

        /// How the baby is fed: breast, formula, or mixed.
        #[arg(long)]
        feeding_type: FeedingType,
    },

    /// Track feeds.
    Feed {
        #[command(subcommand)]
        action: FeedAction,
    },

    /// Track sleep.
    Sleep {
        #[command(subcommand)]
        action: SleepAction,
    },

    /// Log a diaper change.
    Diaper {
        /// What the diaper held: wet, dirty, or both.
        #[arg(long)]
        kind: DiaperKind,

        /// Stool color, triaged against the safety rules.
        #[arg(long)]
        color: Option<String>,

        /// Free-form notes.
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Show the profile, active timers, and recent events.
    Status,

    /// Run one alert evaluation pass and print the result.
    Alerts,

    /// Re-evaluate alerts periodically until interrupted.
    Watch {
        /// Seconds between evaluations.
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
    },

    /// Delete the profile and all logged events.
    Clear,
}

/// Feed tracking actions.
#[derive(Debug, Subcommand)]
pub enum FeedAction {
    /// Start a feed timer.
    Start {
        /// breast or formula.
        #[arg(long, default_value = "breast")]
        kind: FeedKind,

        /// left, right, or both (breast feeds).
        #[arg(long)]
        side: Option<FeedSide>,
    },

    /// End the active feed and log it.
    End {
        /// Amount taken, in milliliters.
        #[arg(long)]
        amount_ml: Option<u32>,
    },

    /// Discard the active feed without logging it.
    Cancel,
}

/// Sleep tracking actions.
#[derive(Debug, Subcommand)]
pub enum SleepAction {
    /// Start a sleep timer; closes the open wake window.
    Start,

    /// End the active sleep and open a new wake window.
    End {
        /// nap or night.
        #[arg(long, default_value = "nap")]
        kind: SleepKind,
    },

    /// Discard the active sleep without logging it.
    Cancel,
}
