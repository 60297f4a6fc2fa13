//! QR payload derivation for the post-registration screen.
//!
//! The QR image itself comes from an external image service; this module
//! only derives the payload encoded in it and the request URL. Fetching
//! or rendering the image is presentation work.

use campus_connect_core::Event;
use url::form_urlencoded;

/// The external image service that renders QR codes.
pub const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Rendered size requested from the image service.
const QR_SIZE: &str = "200x200";

/// The payload encoded in the QR code: `id|name|time`.
#[must_use]
pub fn qr_payload(event: &Event) -> String {
    format!("{}|{}|{}", event.id, event.name, event.time)
}

/// The image-service URL that renders this event's QR code.
#[must_use]
pub fn qr_image_url(event: &Event) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("size", QR_SIZE)
        .append_pair("data", &qr_payload(event))
        .finish();
    format!("{QR_SERVICE_URL}?{query}")
}
