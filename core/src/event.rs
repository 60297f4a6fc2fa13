//! Catalog event identification and record types.
//!
//! Events are produced by the external catalog and treated as opaque by the
//! booking store: only [`EventId`] is ever inspected. Fields the catalog
//! sends that this client does not model are preserved verbatim so a stored
//! booking round-trips exactly as received.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for [`EventId`] parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid event ID: {0}")]
pub struct ParseEventIdError(String);

/// Unique identifier for a catalog event.
///
/// The catalog assigns identifiers as opaque strings; this client never
/// generates them, it only uses them as the join key between bookings and
/// feedback.
///
/// # Validation
///
/// - `FromStr::from_str()`: validates input (rejects empty strings)
/// - `From::from()` and `new()`: no validation, for identifiers that came
///   from the catalog and are trusted as-is
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Create a new `EventId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The sentinel identifier used to tag a record when no event was
    /// supplied.
    ///
    /// Feedback submitted without an event is tagged with this identifier
    /// rather than rejected; two unidentified events therefore share one
    /// feedback slot. This matches the documented behavior of the store.
    #[must_use]
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the `EventId` into its inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = ParseEventIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseEventIdError("Event ID cannot be empty".to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A campus event as received from the catalog.
///
/// The booking store persists events verbatim and never validates or
/// mutates their fields. `time` in particular stays the ISO-8601 string
/// the catalog sent; parsing it is a presentation concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Catalog-assigned identifier, the only field the store inspects.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Where the event takes place.
    pub venue: String,
    /// ISO-8601 timestamp string, passed through untouched.
    pub time: String,
    /// Optional long-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional image URL or opaque image identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional category label (`"Tech"`, `"Sports"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Catalog fields this client does not model, preserved so a stored
    /// booking serializes back to exactly what was received.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Event {
    /// Create an event with the required fields.
    #[must_use]
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        venue: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            venue: venue.into(),
            time: time.into(),
            description: None,
            image: None,
            category: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the image URL or identifier.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
