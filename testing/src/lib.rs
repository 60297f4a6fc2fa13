//! # CampusConnect Testing
//!
//! Testing utilities and helpers for the CampusConnect workspace:
//!
//! - Mock implementations of the environment seams (fixed clock,
//!   fault-injecting storage, static catalog)
//! - The [`ReducerTest`] given/when/then harness and effect assertions
//! - Sample-event builders for the scenarios the store contract names

pub mod fixtures;
pub mod mocks;

pub use fixtures::{hack_night, sample_event};
pub use mocks::{FaultyStorage, FixedClock, StaticCatalog, test_clock};
pub use reducer_test::{ReducerTest, assertions};
