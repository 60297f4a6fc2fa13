//! CLI demo walking through the booking flow.
//!
//! Fetches the catalog, registers for the first event, prints the QR
//! payload, leaves feedback, shows the booked-events view, and cancels.
//! State lands in the configured storage directory and survives reruns.

use anyhow::Result;
use campus_connect::qr;
use campus_connect::{AppConfig, BookingStore, HomeAction, HomeEnvironment, HomeReducer, HomeState};
use campus_connect_catalog::CatalogClient;
use campus_connect_core::feedback::EMOJI_CHOICES;
use campus_connect_runtime::Store;
use campus_connect_storage::FileStorage;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_connect=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    println!("=== CampusConnect ({} mode) ===\n", if config.dark_mode { "dark" } else { "light" });

    let storage = Arc::new(FileStorage::open(&config.storage_dir).await?);
    let bookings = BookingStore::new(storage);

    // Load the catalog through the home-screen store.
    let env = HomeEnvironment::new(Arc::new(CatalogClient::new(&config.catalog_url)));
    let home = Store::new(HomeState::new(), HomeReducer::new(), env);
    let mut handle = home.send(HomeAction::FetchRequested).await;
    handle.wait().await;

    let events = home.state(|s| s.events.clone()).await;
    if let Some(error) = home.state(|s| s.last_error.clone()).await {
        println!("Catalog unavailable ({error}); continuing with stored bookings only.\n");
    } else {
        println!("Catalog: {} events", events.len());
        for event in &events {
            println!("  [{}] {} @ {} ({})", event.id, event.name, event.venue, event.time);
        }
    }

    if let Some(event) = events.first() {
        println!("\nRegistering for {:?}...", event.name);
        bookings.register(event.clone()).await?;
        println!("QR payload: {}", qr::qr_payload(event));
        println!("QR image:   {}", qr::qr_image_url(event));

        println!("\nLeaving feedback...");
        bookings
            .submit_feedback(Some(event.id.clone()), EMOJI_CHOICES[2], "  great event  ")
            .await?;
    }

    println!("\nBooked events:");
    for entry in bookings.booked_view().await? {
        match &entry.feedback {
            Some(fb) => println!("  {} - {} \"{}\"", entry.event.name, fb.emoji, fb.comment),
            None => println!("  {} - no feedback yet", entry.event.name),
        }
    }

    if let Some(event) = events.first() {
        println!("\nCancelling {:?}...", event.name);
        bookings.cancel(&event.id).await?;
        println!("Bookings left: {}", bookings.list_bookings().await?.len());
        // Feedback outlives the booking.
        if let Some(fb) = bookings.feedback_for(&event.id).await? {
            println!("Feedback kept: {} \"{}\"", fb.emoji, fb.comment);
        }
    }

    println!("\n=== Done ===");
    Ok(())
}
