//! # CampusConnect Catalog
//!
//! Client for the external event catalog: a single HTTP GET returning a
//! JSON array of events, plus the pure search/category filtering the
//! home screen applies to the fetched list.
//!
//! The catalog is read-only and uncached: one fetch per screen load,
//! results replace any prior list wholesale. No pagination, auth, or
//! retries.

pub mod client;
pub mod error;
pub mod search;

pub use client::{CatalogClient, EventsApi, EventsFuture};
pub use error::CatalogError;
pub use search::{Category, filter_events, matches_search};
