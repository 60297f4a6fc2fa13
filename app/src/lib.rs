//! # CampusConnect
//!
//! Client core of the campus-event discovery and booking app: browse
//! events fetched from the external catalog, register for one, derive the
//! QR payload, leave feedback, and review booked events.
//!
//! The load-bearing piece is [`store::BookingStore`], the durable
//! booking/feedback store with its read-modify-write contract against the
//! on-device key-value storage. [`home`] carries the reducer-driven
//! screen state (catalog fetch, search, category), [`qr`] derives the
//! QR payload shown after registration, and [`config`] is the explicit
//! configuration object handed to presentation code.

pub mod config;
pub mod home;
pub mod qr;
pub mod store;

pub use config::AppConfig;
pub use home::{HomeAction, HomeEnvironment, HomeReducer, HomeState};
pub use store::{BookedEntry, BookingError, BookingStore, EventStatus};
