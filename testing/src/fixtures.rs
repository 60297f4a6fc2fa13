//! Sample events for tests and demos.

use campus_connect_core::Event;

/// A minimal event with the given id and name.
#[must_use]
pub fn sample_event(id: &str, name: &str) -> Event {
    Event::new(id, name, "Lab A", "2024-01-01T18:00:00Z")
}

/// The canonical scenario event: id `"42"`, Hack Night in Lab A.
#[must_use]
pub fn hack_night() -> Event {
    Event::new("42", "Hack Night", "Lab A", "2024-01-01T18:00:00Z")
}
