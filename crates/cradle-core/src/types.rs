//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A tag string did not match any known variant.
    #[error("unknown {field}: {value}")]
    UnknownTag { field: &'static str, value: String },
}

/// A validated event identifier.
///
/// Event IDs must be non-empty strings. The store generates them as UUID v4,
/// but any non-empty string loaded from storage is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(String);

impl EventId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "event ID" });
        }
        Ok(Self(id))
    }

    /// Generates a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generates a lowercase string tag enum with parsing and display.
macro_rules! define_tag {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal { $($variant:ident => $tag:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// String representation for storage and display.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(Self::$variant),)+
                    _ => Err(ValidationError::UnknownTag {
                        field: $field_name,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

define_tag!(
    /// How the baby is fed overall, set on the profile.
    ///
    /// Drives the feed-interval band; `Breast` is also the fallback band when
    /// the type is unknown.
    FeedingType, "feeding type" {
        Breast => "breast",
        Formula => "formula",
        Mixed => "mixed",
    }
);

define_tag!(
    /// The kind of a single feed event.
    FeedKind, "feed kind" {
        Breast => "breast",
        Formula => "formula",
    }
);

define_tag!(
    /// Which side a breast feed used.
    FeedSide, "feed side" {
        Left => "left",
        Right => "right",
        Both => "both",
    }
);

define_tag!(
    /// Nap or overnight sleep.
    SleepKind, "sleep kind" {
        Nap => "nap",
        Night => "night",
    }
);

define_tag!(
    /// What a diaper change found.
    DiaperKind, "diaper kind" {
        Wet => "wet",
        Dirty => "dirty",
        Both => "both",
    }
);

define_tag!(
    /// How loud an alert or safety finding should be.
    Severity, "severity" {
        Info => "info",
        Warning => "warning",
        Critical => "critical",
        Success => "success",
    }
);
