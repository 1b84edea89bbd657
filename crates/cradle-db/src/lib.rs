//! Storage layer for the infant tracker.
//!
//! Persists the care snapshot using `rusqlite`, one row per snapshot slot:
//! profile, the three logs, the two active-event slots, and the wake-window
//! anchor. Values are JSON text; timestamps inside them are ISO 8601 UTC.
//!
//! # Consistency
//!
//! The seven slots are written independently, not in one transaction. A
//! crash between writes can leave them mutually inconsistent; [`Database::load`]
//! tolerates that by falling back to an empty/absent default for any slot
//! that is missing or unparseable, logging what it skipped.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`. Use one instance per thread or wrap it in a `Mutex` for shared
//! access.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use cradle_core::Snapshot;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// The seven snapshot slot keys.
const KEY_PROFILE: &str = "profile";
const KEY_FEED_LOG: &str = "feed_log";
const KEY_SLEEP_LOG: &str = "sleep_log";
const KEY_DIAPER_LOG: &str = "diaper_log";
const KEY_ACTIVE_FEED: &str = "active_feed";
const KEY_ACTIVE_SLEEP: &str = "active_sleep";
const KEY_WAKE_TIME: &str = "wake_time";

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshot (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Loads the full snapshot, defaulting any missing or unparseable slot.
    pub fn load(&self) -> Result<Snapshot, DbError> {
        Ok(Snapshot {
            profile: self.read_slot(KEY_PROFILE)?,
            feed_log: self.read_slot(KEY_FEED_LOG)?.unwrap_or_default(),
            sleep_log: self.read_slot(KEY_SLEEP_LOG)?.unwrap_or_default(),
            diaper_log: self.read_slot(KEY_DIAPER_LOG)?.unwrap_or_default(),
            active_feed: self.read_slot(KEY_ACTIVE_FEED)?,
            active_sleep: self.read_slot(KEY_ACTIVE_SLEEP)?,
            current_wake_time: self.read_slot(KEY_WAKE_TIME)?,
        })
    }

    /// Writes every slot of the snapshot. Each slot is its own write; see
    /// the module docs for the consistency trade-off.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), DbError> {
        self.write_slot(KEY_PROFILE, snapshot.profile.as_ref())?;
        self.write_slot(KEY_FEED_LOG, Some(&snapshot.feed_log))?;
        self.write_slot(KEY_SLEEP_LOG, Some(&snapshot.sleep_log))?;
        self.write_slot(KEY_DIAPER_LOG, Some(&snapshot.diaper_log))?;
        self.write_slot(KEY_ACTIVE_FEED, snapshot.active_feed.as_ref())?;
        self.write_slot(KEY_ACTIVE_SLEEP, snapshot.active_sleep.as_ref())?;
        self.write_slot(KEY_WAKE_TIME, snapshot.current_wake_time.as_ref())?;
        Ok(())
    }

    /// Deletes every slot.
    pub fn clear(&self) -> Result<(), DbError> {
        self.conn.execute("DELETE FROM snapshot", [])?;
        Ok(())
    }

    /// Reads and parses one slot. Unparseable JSON is logged and treated as
    /// absent rather than failing the whole load.
    fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DbError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshot WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(json) = value else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(error) => {
                tracing::warn!(key, %error, "skipping unparseable snapshot slot");
                Ok(None)
            }
        }
    }

    /// Upserts one slot, or deletes it when the value is absent.
    fn write_slot<T: Serialize>(&self, key: &str, value: Option<&T>) -> Result<(), DbError> {
        let Some(value) = value else {
            self.conn
                .execute("DELETE FROM snapshot WHERE key = ?1", params![key])?;
            return Ok(());
        };

        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(error) => {
                // Serialization of in-memory state should never fail; skip the
                // slot rather than losing the rest of the save.
                tracing::warn!(key, %error, "failed to serialize snapshot slot");
                return Ok(());
            }
        };

        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "INSERT INTO snapshot (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            params![key, json, updated_at],
        )?;
        Ok(())
    }
}
