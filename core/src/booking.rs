//! The booking collection: registered events, at most one per event id.

use crate::event::{Event, EventId};
use serde::{Deserialize, Serialize};

/// Ordered collection of registered events.
///
/// Serializes as a plain JSON array of events, which is the shape the
/// `"registeredEvents"` storage key holds. Insertion order is preserved;
/// the invariant (at most one entry per distinct event id) is enforced
/// by [`register`](Self::register), the only way to add an entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingList(Vec<Event>);

impl BookingList {
    /// Create an empty booking list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bookings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether an event with this id is booked.
    #[must_use]
    pub fn contains(&self, id: &EventId) -> bool {
        self.0.iter().any(|e| e.id == *id)
    }

    /// The booking for this id, if present.
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.0.iter().find(|e| e.id == *id)
    }

    /// Append a booking unless one with the same id already exists.
    ///
    /// Returns `true` if the event was added, `false` if it was already
    /// booked (the existing entry is left untouched; re-registering does
    /// not update it).
    pub fn register(&mut self, event: Event) -> bool {
        if self.contains(&event.id) {
            return false;
        }
        self.0.push(event);
        true
    }

    /// Remove the booking with this id, if any.
    ///
    /// Returns `true` if an entry was removed. All other entries keep
    /// their relative order.
    pub fn cancel(&mut self, id: &EventId) -> bool {
        let before = self.0.len();
        self.0.retain(|e| e.id != *id);
        before != self.0.len()
    }

    /// The bookings in insertion order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.0
    }

    /// Iterate over the bookings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.0.iter()
    }
}

impl IntoIterator for BookingList {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Event> for BookingList {
    /// Collect events, dropping any whose id is already present.
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        let mut list = Self::new();
        for event in iter {
            list.register(event);
        }
        list
    }
}
