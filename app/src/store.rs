//! The booking/feedback store.
//!
//! Owns the two persisted collections (registered events and feedback)
//! in the flat key-value store behind [`StorageClient`]. All writes go
//! through the three operations here; screens read through the lookup
//! methods, which re-read the persisted value on every call (the
//! "always fresh" policy; there is no cache to go stale).
//!
//! Each collection key has its own async mutex, so two operations racing
//! on the same key (a rapid double-tap on Register) serialize instead of
//! clobbering each other's read-modify-write. Operations on different
//! keys stay independent, as do the collections themselves: cancelling a
//! booking never touches its feedback.

use campus_connect_core::environment::{Clock, SystemClock};
use campus_connect_core::storage::{FEEDBACK_KEY, REGISTERED_EVENTS_KEY};
use campus_connect_core::{
    BookingList, EmojiRequired, Event, EventId, Feedback, FeedbackLog, StorageClient, StorageError,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors surfaced by booking store operations.
///
/// Validation failures happen before any storage access; storage faults
/// are logged at the operation boundary and returned so the caller can
/// decide whether to retry or surface them.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Feedback was submitted without an emoji selection; nothing was
    /// written.
    #[error(transparent)]
    EmojiRequired(#[from] EmojiRequired),

    /// The underlying key-value store failed; the intended change did
    /// not happen.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The observable state of one event across the two collections.
///
/// Driven solely by register, cancel, and submit-feedback; neither
/// collection ever blocks a transition of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// No booking, no feedback.
    NotBooked,
    /// Booked, no feedback yet.
    Booked,
    /// Booked with feedback given.
    BookedWithFeedback,
    /// Feedback given, booking since cancelled.
    FeedbackOnly,
}

/// One row of the booked-events screen: a booking joined with its
/// feedback, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct BookedEntry {
    /// The booked event, verbatim as registered.
    pub event: Event,
    /// The feedback for this event, if any was submitted.
    pub feedback: Option<Feedback>,
}

/// The booking/feedback store.
pub struct BookingStore {
    storage: Arc<dyn StorageClient>,
    clock: Arc<dyn Clock>,
    bookings_gate: Mutex<()>,
    feedback_gate: Mutex<()>,
}

impl BookingStore {
    /// Create a store over the given storage, stamping feedback with the
    /// system clock.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageClient>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    /// Create a store with an explicit clock (tests use a fixed one).
    #[must_use]
    pub fn with_clock(storage: Arc<dyn StorageClient>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            bookings_gate: Mutex::new(()),
            feedback_gate: Mutex::new(()),
        }
    }

    /// Register for an event.
    ///
    /// Appends the event to the booking collection unless an entry with
    /// the same id already exists; re-registering is a no-op, never a
    /// duplicate or an update. On success the caller moves on to the
    /// QR screen for the same event.
    ///
    /// # Errors
    ///
    /// [`BookingError::Storage`] if the read or write failed; the
    /// collection is then unchanged.
    pub async fn register(&self, event: Event) -> Result<(), BookingError> {
        let outcome = self.register_inner(event).await;
        if let Err(error) = &outcome {
            tracing::error!(%error, "registration failed");
        }
        outcome
    }

    async fn register_inner(&self, event: Event) -> Result<(), BookingError> {
        let _gate = self.bookings_gate.lock().await;
        let mut bookings: BookingList = self.load(REGISTERED_EVENTS_KEY).await?;
        if bookings.register(event) {
            self.persist(REGISTERED_EVENTS_KEY, &bookings).await?;
        } else {
            tracing::debug!("event already booked; nothing to do");
        }
        Ok(())
    }

    /// Cancel the booking for an event.
    ///
    /// Removes the at-most-one entry with this id; cancelling an id that
    /// was never booked is a no-op. Await completion before assuming the
    /// booking is gone; there is no optimistic removal. Feedback for the
    /// event is left in place.
    ///
    /// # Errors
    ///
    /// [`BookingError::Storage`] if the read or write failed.
    pub async fn cancel(&self, id: &EventId) -> Result<(), BookingError> {
        let outcome = self.cancel_inner(id).await;
        if let Err(error) = &outcome {
            tracing::error!(%error, event_id = %id, "cancellation failed");
        }
        outcome
    }

    async fn cancel_inner(&self, id: &EventId) -> Result<(), BookingError> {
        let _gate = self.bookings_gate.lock().await;
        let mut bookings: BookingList = self.load(REGISTERED_EVENTS_KEY).await?;
        if bookings.cancel(id) {
            self.persist(REGISTERED_EVENTS_KEY, &bookings).await?;
        }
        Ok(())
    }

    /// Submit feedback for an event.
    ///
    /// The comment is trimmed and may be empty; the emoji may not. A
    /// missing event id is tagged with the `"unknown"` sentinel rather
    /// than rejected. Any prior feedback for the same id is replaced
    /// wholesale: last write wins, no merge.
    ///
    /// # Errors
    ///
    /// - [`BookingError::EmojiRequired`] if no emoji was chosen; the
    ///   collection is untouched.
    /// - [`BookingError::Storage`] if the read or write failed.
    pub async fn submit_feedback(
        &self,
        event_id: Option<EventId>,
        emoji: &str,
        comment: &str,
    ) -> Result<(), BookingError> {
        let outcome = self.submit_feedback_inner(event_id, emoji, comment).await;
        if let Err(error) = &outcome {
            tracing::error!(%error, "feedback submission failed");
        }
        outcome
    }

    async fn submit_feedback_inner(
        &self,
        event_id: Option<EventId>,
        emoji: &str,
        comment: &str,
    ) -> Result<(), BookingError> {
        // Validate before touching storage.
        let entry = Feedback::compose(event_id, emoji, comment, self.clock.now())?;

        let _gate = self.feedback_gate.lock().await;
        let mut log: FeedbackLog = self.load(FEEDBACK_KEY).await?;
        log.record(entry);
        self.persist(FEEDBACK_KEY, &log).await?;
        Ok(())
    }

    /// The full booking collection, insertion order, as last persisted.
    ///
    /// Re-reads the store on every call; screens call this on every
    /// activation.
    ///
    /// # Errors
    ///
    /// [`BookingError::Storage`] if the read failed.
    pub async fn list_bookings(&self) -> Result<Vec<Event>, BookingError> {
        let bookings: BookingList = self.load(REGISTERED_EVENTS_KEY).await?;
        Ok(bookings.into_iter().collect())
    }

    /// The feedback for this event id, if any.
    ///
    /// # Errors
    ///
    /// [`BookingError::Storage`] if the read failed.
    pub async fn feedback_for(&self, id: &EventId) -> Result<Option<Feedback>, BookingError> {
        let log: FeedbackLog = self.load(FEEDBACK_KEY).await?;
        Ok(log.for_event(id).cloned())
    }

    /// Every booking joined with its feedback, for the booked-events
    /// screen.
    ///
    /// # Errors
    ///
    /// [`BookingError::Storage`] if either read failed.
    pub async fn booked_view(&self) -> Result<Vec<BookedEntry>, BookingError> {
        let bookings: BookingList = self.load(REGISTERED_EVENTS_KEY).await?;
        let log: FeedbackLog = self.load(FEEDBACK_KEY).await?;
        Ok(bookings
            .into_iter()
            .map(|event| {
                let feedback = log.for_event(&event.id).cloned();
                BookedEntry { event, feedback }
            })
            .collect())
    }

    /// Where this event stands across bookings and feedback.
    ///
    /// # Errors
    ///
    /// [`BookingError::Storage`] if either read failed.
    pub async fn event_status(&self, id: &EventId) -> Result<EventStatus, BookingError> {
        let bookings: BookingList = self.load(REGISTERED_EVENTS_KEY).await?;
        let log: FeedbackLog = self.load(FEEDBACK_KEY).await?;
        Ok(match (bookings.contains(id), log.for_event(id).is_some()) {
            (false, false) => EventStatus::NotBooked,
            (true, false) => EventStatus::Booked,
            (true, true) => EventStatus::BookedWithFeedback,
            (false, true) => EventStatus::FeedbackOnly,
        })
    }

    /// Read and decode one collection; a missing key is an empty one.
    async fn load<T>(&self, key: &str) -> Result<T, BookingError>
    where
        T: DeserializeOwned + Default,
    {
        match self.storage.get_item(key).await? {
            None => Ok(T::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                BookingError::Storage(StorageError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            }),
        }
    }

    /// Encode and write one collection back.
    async fn persist<T>(&self, key: &str, value: &T) -> Result<(), BookingError>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(value).map_err(|e| {
            BookingError::Storage(StorageError::Io(format!("encoding key {key:?}: {e}")))
        })?;
        self.storage.set_item(key, raw).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use campus_connect_storage::MemoryStorage;
    use campus_connect_testing::{FaultyStorage, hack_night, sample_event, test_clock};

    fn store() -> BookingStore {
        BookingStore::with_clock(Arc::new(MemoryStorage::new()), Arc::new(test_clock()))
    }

    #[tokio::test]
    async fn register_then_list() {
        let store = store();
        store.register(hack_night()).await.unwrap();

        let bookings = store.list_bookings().await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id.as_str(), "42");
        assert_eq!(bookings[0].name, "Hack Night");
    }

    #[tokio::test]
    async fn re_register_does_not_duplicate() {
        let store = store();
        store.register(hack_night()).await.unwrap();
        store.register(hack_night()).await.unwrap();

        assert_eq!(store.list_bookings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancel_removes_exactly_the_target() {
        let store = store();
        store.register(sample_event("1", "A")).await.unwrap();
        store.register(sample_event("2", "B")).await.unwrap();
        store.register(sample_event("3", "C")).await.unwrap();

        store.cancel(&EventId::new("2")).await.unwrap();

        let names: Vec<_> = store
            .list_bookings()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[tokio::test]
    async fn cancel_of_unknown_id_is_noop() {
        let store = store();
        store.register(hack_night()).await.unwrap();
        store.cancel(&EventId::new("404")).await.unwrap();
        assert_eq!(store.list_bookings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn feedback_replaces_prior_entry() {
        let store = store();
        let id = EventId::new("42");
        store.submit_feedback(Some(id.clone()), "👍", "a").await.unwrap();
        store.submit_feedback(Some(id.clone()), "😍", "b").await.unwrap();

        let fb = store.feedback_for(&id).await.unwrap().unwrap();
        assert_eq!(fb.emoji, "😍");
        assert_eq!(fb.comment, "b");
    }

    #[tokio::test]
    async fn feedback_without_emoji_is_rejected_before_any_write() {
        let storage = Arc::new(FaultyStorage::new());
        // Even a completely broken store never gets touched.
        storage.fail_reads(true);
        storage.fail_writes(true);
        let store = BookingStore::with_clock(storage.clone(), Arc::new(test_clock()));

        let result = store.submit_feedback(Some(EventId::new("42")), "", "comment").await;
        assert!(matches!(result, Err(BookingError::EmojiRequired(_))));

        storage.fail_reads(false);
        assert_eq!(store.feedback_for(&EventId::new("42")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn feedback_comment_is_trimmed() {
        let store = store();
        store
            .submit_feedback(Some(EventId::new("42")), "🔥", "  great event  ")
            .await
            .unwrap();

        let fb = store.feedback_for(&EventId::new("42")).await.unwrap().unwrap();
        assert_eq!(fb.comment, "great event");
    }

    #[tokio::test]
    async fn feedback_without_event_uses_unknown_sentinel() {
        let store = store();
        store.submit_feedback(None, "👍", "who knows").await.unwrap();

        let fb = store.feedback_for(&EventId::unknown()).await.unwrap().unwrap();
        assert_eq!(fb.comment, "who knows");
    }

    #[tokio::test]
    async fn cancellation_keeps_feedback() {
        let store = store();
        let id = EventId::new("42");
        store.register(hack_night()).await.unwrap();
        store.submit_feedback(Some(id.clone()), "🔥", "great").await.unwrap();

        store.cancel(&id).await.unwrap();

        assert!(store.list_bookings().await.unwrap().is_empty());
        let fb = store.feedback_for(&id).await.unwrap().unwrap();
        assert_eq!(fb.emoji, "🔥");
        assert_eq!(store.event_status(&id).await.unwrap(), EventStatus::FeedbackOnly);
    }

    #[tokio::test]
    async fn event_status_walks_all_four_states() {
        let store = store();
        let id = EventId::new("42");
        assert_eq!(store.event_status(&id).await.unwrap(), EventStatus::NotBooked);

        store.register(hack_night()).await.unwrap();
        assert_eq!(store.event_status(&id).await.unwrap(), EventStatus::Booked);

        store.submit_feedback(Some(id.clone()), "👍", "").await.unwrap();
        assert_eq!(
            store.event_status(&id).await.unwrap(),
            EventStatus::BookedWithFeedback
        );

        store.cancel(&id).await.unwrap();
        assert_eq!(store.event_status(&id).await.unwrap(), EventStatus::FeedbackOnly);
    }

    #[tokio::test]
    async fn booked_view_joins_feedback_by_id() {
        let store = store();
        store.register(sample_event("1", "A")).await.unwrap();
        store.register(sample_event("2", "B")).await.unwrap();
        store.submit_feedback(Some(EventId::new("2")), "😐", "meh").await.unwrap();

        let view = store.booked_view().await.unwrap();
        assert_eq!(view.len(), 2);
        assert!(view[0].feedback.is_none());
        assert_eq!(view[1].feedback.as_ref().unwrap().emoji, "😐");
    }

    #[tokio::test]
    async fn storage_faults_surface_as_typed_errors() {
        let storage = Arc::new(FaultyStorage::new());
        let store = BookingStore::with_clock(storage.clone(), Arc::new(test_clock()));

        storage.fail_reads(true);
        assert!(matches!(
            store.register(hack_night()).await,
            Err(BookingError::Storage(_))
        ));
        assert!(matches!(store.list_bookings().await, Err(BookingError::Storage(_))));
        storage.fail_reads(false);

        storage.fail_writes(true);
        assert!(matches!(
            store.register(hack_night()).await,
            Err(BookingError::Storage(_))
        ));
        storage.fail_writes(false);

        // A failed write left nothing behind.
        assert!(store.list_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_stored_value_is_reported_with_its_key() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(REGISTERED_EVENTS_KEY, "not json".to_string())
            .await
            .unwrap();
        let store = BookingStore::new(storage);

        match store.list_bookings().await {
            Err(BookingError::Storage(StorageError::Corrupt { key, .. })) => {
                assert_eq!(key, REGISTERED_EVENTS_KEY);
            }
            other => panic!("expected corrupt error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lookups_are_always_fresh() {
        let storage = Arc::new(MemoryStorage::new());
        let store = BookingStore::new(storage.clone());
        assert!(store.list_bookings().await.unwrap().is_empty());

        // A value landing in storage between calls is visible immediately:
        // there is no cache in front of the persisted bytes.
        let raw = serde_json::to_string(&vec![hack_night()]).unwrap();
        storage.set_item(REGISTERED_EVENTS_KEY, raw).await.unwrap();
        assert_eq!(store.list_bookings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn double_tap_register_stays_single() {
        let store = Arc::new(store());
        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.register(hack_night()).await })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.register(hack_night()).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(store.list_bookings().await.unwrap().len(), 1);
    }
}
