//! Catalog API client implementation.

use crate::error::CatalogError;
use campus_connect_core::Event;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`EventsApi::fetch`].
pub type EventsFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Event>, CatalogError>> + Send + 'a>>;

/// The seam the home screen fetches events through.
///
/// [`CatalogClient`] is the production implementation; tests substitute a
/// static stub so reducer behavior can be exercised without a network.
pub trait EventsApi: Send + Sync {
    /// Fetch the full event list.
    fn fetch(&self) -> EventsFuture<'_>;
}

/// Event catalog API client.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: String,
}

impl CatalogClient {
    /// Create a new client fetching from `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint this client fetches from.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the event list.
    ///
    /// A single GET; the returned list replaces whatever the caller held
    /// before. Event fields are taken as-is; unknown fields are kept in
    /// [`Event::extra`], nothing is validated.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RequestFailed`] if the request never completed
    /// - [`CatalogError::ApiError`] on a non-OK status
    /// - [`CatalogError::ResponseParseFailed`] if the body is not a JSON
    ///   array of events
    pub async fn fetch_events(&self) -> Result<Vec<Event>, CatalogError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let events = response
                    .json::<Vec<Event>>()
                    .await
                    .map_err(|e| CatalogError::ResponseParseFailed(e.to_string()))?;
                tracing::debug!(count = events.len(), "fetched event catalog");
                Ok(events)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(CatalogError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

impl EventsApi for CatalogClient {
    fn fetch(&self) -> EventsFuture<'_> {
        Box::pin(self.fetch_events())
    }
}
