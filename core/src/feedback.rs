//! Feedback records: one emoji + comment per event, last write wins.

use crate::event::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The emoji choices the feedback screen offers.
pub const EMOJI_CHOICES: [&str; 5] = ["👍", "😍", "🔥", "😐", "👎"];

/// Error returned when feedback is submitted without an emoji selection.
///
/// Surfaced to the caller before anything is written; the feedback
/// collection is untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please select an emoji for feedback")]
pub struct EmojiRequired;

/// A single feedback entry for one event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Id of the event this feedback belongs to, or the `"unknown"`
    /// sentinel when none was supplied.
    pub id: EventId,
    /// The chosen emoji, never empty.
    pub emoji: String,
    /// Free-form comment, trimmed; may be empty.
    pub comment: String,
    /// When the feedback was submitted.
    pub timestamp: DateTime<Utc>,
}

impl Feedback {
    /// Build a feedback entry from raw screen input.
    ///
    /// The comment is trimmed of surrounding whitespace. A missing event
    /// id is tagged with [`EventId::unknown`] rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiRequired`] if no emoji was chosen; nothing is
    /// recorded in that case.
    pub fn compose(
        event_id: Option<EventId>,
        emoji: &str,
        comment: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, EmojiRequired> {
        if emoji.is_empty() {
            return Err(EmojiRequired);
        }
        Ok(Self {
            id: event_id.unwrap_or_else(EventId::unknown),
            emoji: emoji.to_string(),
            comment: comment.trim().to_string(),
            timestamp,
        })
    }
}

/// Ordered collection of feedback entries, at most one per event id.
///
/// Serializes as a plain JSON array, the shape the `"feedback"` storage
/// key holds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackLog(Vec<Feedback>);

impl FeedbackLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record feedback, replacing any prior entry for the same id.
    ///
    /// Replacement is wholesale: the old entry is dropped, not merged,
    /// and the new entry moves to the end of the log. Returns the
    /// replaced entry, if there was one.
    pub fn record(&mut self, feedback: Feedback) -> Option<Feedback> {
        let prior = self
            .0
            .iter()
            .position(|f| f.id == feedback.id)
            .map(|i| self.0.remove(i));
        self.0.push(feedback);
        prior
    }

    /// The feedback for this event id, if any.
    #[must_use]
    pub fn for_event(&self, id: &EventId) -> Option<&Feedback> {
        self.0.iter().find(|f| f.id == *id)
    }

    /// The entries in log order.
    #[must_use]
    pub fn entries(&self) -> &[Feedback] {
        &self.0
    }

    /// Iterate over the entries in log order.
    pub fn iter(&self) -> impl Iterator<Item = &Feedback> {
        self.0.iter()
    }
}
