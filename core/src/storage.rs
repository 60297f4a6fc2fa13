//! The key-value storage seam the collections are persisted in.
//!
//! This module defines the abstraction over the on-device store: an
//! asynchronous, durable map from string keys to string (serialized)
//! values. Exactly two keys are in use, [`REGISTERED_EVENTS_KEY`] and
//! [`FEEDBACK_KEY`], each holding a JSON array. A missing key is
//! equivalent to an empty collection; first use bootstraps it.
//!
//! # Implementations
//!
//! - `FileStorage` (in `campus-connect-storage`): durable on-disk store
//! - `MemoryStorage` (in `campus-connect-storage`): fast, deterministic,
//!   for tests and demos
//!
//! # Dyn Compatibility
//!
//! The trait uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` so it can be used as a trait object (`Arc<dyn
//! StorageClient>`), which is how the booking store and effects hold it.

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage key holding the JSON array of registered events.
pub const REGISTERED_EVENTS_KEY: &str = "registeredEvents";

/// Storage key holding the JSON array of feedback entries.
pub const FEEDBACK_KEY: &str = "feedback";

/// Errors that can occur against the underlying key-value store.
///
/// Operations fail outright: there is no retry, timeout, or rollback at
/// this layer. A failed read leaves the store untouched; a failed write
/// means the intended change did not happen.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying read or write failed (disk fault, permission, ...).
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// The stored value could not be read back as valid data.
    #[error("Stored value for key \"{key}\" is corrupt: {message}")]
    Corrupt {
        /// The key whose value failed to decode.
        key: String,
        /// Decoder error description.
        message: String,
    },

    /// The store refused the write for capacity reasons.
    #[error("Storage quota exceeded writing key \"{0}\"")]
    QuotaExceeded(String),
}

/// Boxed future returned by [`StorageClient`] methods.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Asynchronous string-keyed storage.
///
/// Method names mirror the on-device store this seam abstracts: get an
/// item, set an item, remove an item. Values are opaque strings; the
/// serialization format is the caller's business.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the store is shared across
/// tasks behind an `Arc`.
pub trait StorageClient: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written; absence is
    /// not an error.
    ///
    /// # Errors
    ///
    /// [`StorageError::Io`] if the underlying read fails.
    fn get_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>>;

    /// Write `value` under `key`, replacing any prior value.
    ///
    /// The write must be durable when the future resolves: a crash
    /// afterwards may lose nothing, a crash during the write must leave
    /// either the old or the new value, never a torn one.
    ///
    /// # Errors
    ///
    /// [`StorageError::Io`] or [`StorageError::QuotaExceeded`] if the
    /// write fails; the prior value is then still in place.
    fn set_item<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()>;

    /// Remove the value stored under `key`, if any.
    ///
    /// Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// [`StorageError::Io`] if the underlying removal fails.
    fn remove_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let error = StorageError::Io("disk full".to_string());
        assert!(format!("{error}").contains("disk full"));
    }

    #[test]
    fn corrupt_error_names_the_key() {
        let error = StorageError::Corrupt {
            key: REGISTERED_EVENTS_KEY.to_string(),
            message: "expected value at line 1".to_string(),
        };
        let display = format!("{error}");
        assert!(display.contains("registeredEvents"));
        assert!(display.contains("expected value"));
    }

    #[test]
    fn quota_error_names_the_key() {
        let error = StorageError::QuotaExceeded(FEEDBACK_KEY.to_string());
        assert!(format!("{error}").contains("feedback"));
    }
}
