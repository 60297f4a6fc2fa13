//! # CampusConnect Storage
//!
//! [`StorageClient`](campus_connect_core::StorageClient) backends:
//!
//! - [`MemoryStorage`]: `HashMap` behind a lock; fast and deterministic,
//!   for tests and demos
//! - [`FileStorage`]: one file per key under a directory, with
//!   atomic replace-on-write so a crash never leaves a torn value

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
