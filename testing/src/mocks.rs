//! Mock implementations of the environment seams.

use campus_connect_catalog::{CatalogError, EventsApi, EventsFuture};
use campus_connect_core::environment::Clock;
use campus_connect_core::storage::{StorageClient, StorageError, StorageFuture};
use campus_connect_core::{DateTime, Event, Utc};
use campus_connect_storage::MemoryStorage;
use std::sync::atomic::{AtomicBool, Ordering};

/// Fixed clock for deterministic tests.
///
/// Always returns the same time, making timestamps reproducible.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC).
///
/// # Panics
///
/// Panics if the hardcoded timestamp fails to parse, which should never
/// happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

/// Storage wrapper that injects faults on demand.
///
/// Wraps a [`MemoryStorage`] and fails reads or writes while the matching
/// toggle is on, so tests can observe how operations surface storage
/// faults without touching a disk.
#[derive(Default)]
pub struct FaultyStorage {
    inner: MemoryStorage,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FaultyStorage {
    /// Create a healthy store; flip the toggles to start failing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StorageClient for FaultyStorage {
    fn get_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Box::pin(async { Err(StorageError::Io("injected read fault".to_string())) });
        }
        self.inner.get_item(key)
    }

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Box::pin(async { Err(StorageError::Io("injected write fault".to_string())) });
        }
        self.inner.set_item(key, value)
    }

    fn remove_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Box::pin(async { Err(StorageError::Io("injected write fault".to_string())) });
        }
        self.inner.remove_item(key)
    }
}

/// Catalog stub serving a fixed event list, or a fixed failure.
pub struct StaticCatalog {
    result: Result<Vec<Event>, String>,
}

impl StaticCatalog {
    /// A catalog that always returns these events.
    #[must_use]
    pub const fn with_events(events: Vec<Event>) -> Self {
        Self { result: Ok(events) }
    }

    /// A catalog whose fetch always fails with this message.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

impl EventsApi for StaticCatalog {
    fn fetch(&self) -> EventsFuture<'_> {
        let result = match &self.result {
            Ok(events) => Ok(events.clone()),
            Err(message) => Err(CatalogError::RequestFailed(message.clone())),
        };
        Box::pin(async move { result })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[tokio::test]
    async fn faulty_storage_passes_through_when_healthy() {
        let storage = FaultyStorage::new();
        storage.set_item("k", "v".to_string()).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn faulty_storage_injects_and_recovers() {
        let storage = FaultyStorage::new();
        storage.set_item("k", "v".to_string()).await.unwrap();

        storage.fail_reads(true);
        assert!(storage.get_item("k").await.is_err());

        storage.fail_writes(true);
        assert!(storage.set_item("k", "w".to_string()).await.is_err());
        assert!(storage.remove_item("k").await.is_err());

        storage.fail_reads(false);
        storage.fail_writes(false);
        // The failed write never landed.
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn static_catalog_serves_and_fails() {
        let ok = StaticCatalog::with_events(vec![Event::new(
            "1",
            "Hack Night",
            "Lab A",
            "2024-01-01T18:00:00Z",
        )]);
        assert_eq!(ok.fetch().await.unwrap().len(), 1);

        let bad = StaticCatalog::failing("offline");
        assert!(bad.fetch().await.is_err());
    }
}
