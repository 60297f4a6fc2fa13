//! Pure filtering over the fetched event list.
//!
//! The home screen narrows the catalog two ways at once: a free-text
//! search over name and venue, and a category chip. Both are applied
//! in-memory to the last fetched list; the catalog itself is never
//! queried with filters.

use campus_connect_core::Event;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for [`Category`] parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown category: {0}")]
pub struct ParseCategoryError(String);

/// The category chips the home screen offers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Category {
    /// No category filter.
    #[default]
    All,
    /// Tech events.
    Tech,
    /// Sports events.
    Sports,
    /// Seminars.
    Seminar,
    /// Workshops.
    Workshop,
}

impl Category {
    /// Every selectable category, in display order.
    pub const ALL: [Self; 5] = [Self::All, Self::Tech, Self::Sports, Self::Seminar, Self::Workshop];

    /// The label as shown on the chip and as stored in `Event::category`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Tech => "Tech",
            Self::Sports => "Sports",
            Self::Seminar => "Seminar",
            Self::Workshop => "Workshop",
        }
    }

    /// Whether `event` belongs to this category.
    ///
    /// `All` admits everything; otherwise the event's category label must
    /// match exactly (events without a category only ever show under
    /// `All`, as in the original screen).
    #[must_use]
    pub fn admits(self, event: &Event) -> bool {
        self == Self::All || event.category.as_deref() == Some(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Whether `event` matches a free-text search.
///
/// Case-insensitive substring match over name and venue; an empty query
/// matches everything.
#[must_use]
pub fn matches_search(event: &Event, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    event.name.to_lowercase().contains(&needle) || event.venue.to_lowercase().contains(&needle)
}

/// Apply search and category together, preserving catalog order.
#[must_use]
pub fn filter_events<'a>(events: &'a [Event], query: &str, category: Category) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| matches_search(e, query) && category.admits(e))
        .collect()
}
