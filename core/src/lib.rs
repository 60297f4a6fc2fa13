//! # CampusConnect Core
//!
//! Domain model and architecture seams for the CampusConnect client core.
//!
//! This crate defines the types the rest of the workspace is built on:
//!
//! - **Domain records**: [`event::Event`] (a catalog entry, opaque to the
//!   store beyond its identifier), [`booking::BookingList`] (the registered
//!   events, at most one per event id) and [`feedback::FeedbackLog`]
//!   (emoji + comment records, at most one per event id, last write wins).
//! - **Storage seam**: [`storage::StorageClient`], the asynchronous
//!   string-keyed store the collections are persisted in, with the two
//!   well-known keys [`storage::REGISTERED_EVENTS_KEY`] and
//!   [`storage::FEEDBACK_KEY`].
//! - **Interaction seams**: [`reducer::Reducer`], [`effect::Effect`] and
//!   [`environment::Clock`], the state/action/effect triad the runtime
//!   crate executes for interactive screen state.
//!
//! The collections enforce their invariants structurally: there is no way
//! to push a duplicate booking or a second feedback entry for the same
//! event through the public API.

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

pub mod booking;
pub mod effect;
pub mod environment;
pub mod event;
pub mod feedback;
pub mod reducer;
pub mod storage;

pub use booking::BookingList;
pub use effect::Effect;
pub use environment::{Clock, SystemClock};
pub use event::{Event, EventId};
pub use feedback::{EmojiRequired, Feedback, FeedbackLog};
pub use reducer::{Effects, Reducer};
pub use storage::{FEEDBACK_KEY, REGISTERED_EVENTS_KEY, StorageClient, StorageError};
