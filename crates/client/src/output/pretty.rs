//! Pretty output formatting.

use guestbook_core::guest::{is_inline_image, CreateGuestResponse, GuestRecord};

use crate::client::health::StorageHealth;

const MAX_IMAGE_PREVIEW: usize = 60;

/// Shortens inline images so a terminal is not flooded with base64.
fn image_summary(image: &str) -> String {
    if is_inline_image(image) {
        let header = image.split(',').next().unwrap_or(image);
        format!("{header},... ({} bytes)", image.len())
    } else if image.chars().count() > MAX_IMAGE_PREVIEW {
        let head: String = image.chars().take(MAX_IMAGE_PREVIEW).collect();
        format!("{head}...")
    } else {
        image.to_string()
    }
}

/// Format a guest for display.
pub fn format_guest(guest: &GuestRecord) -> String {
    format!(
        "{}\n  ID: {}\n  Image: {}\n  Created: {}",
        guest.name,
        guest.id,
        image_summary(&guest.image),
        guest.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Format guests for display.
pub fn format_guests(guests: &[GuestRecord]) -> String {
    if guests.is_empty() {
        return "No guests found.".to_string();
    }
    let mut output = format!("GUESTS ({})\n", guests.len());
    output.push_str(&"-".repeat(40));
    for guest in guests {
        output.push_str(&format!("\n{}", format_guest(guest)));
        output.push('\n');
    }
    output
}

/// Format a freshly created guest for display.
pub fn format_created(guest: &CreateGuestResponse) -> String {
    format!(
        "{}\n  ID: {}\n  Image: {}",
        guest.name,
        guest.id,
        image_summary(&guest.image)
    )
}

/// Format storage health for display.
pub fn format_health(health: &StorageHealth) -> String {
    let mut output = format!(
        "Storage Health:\n  Status: {}\n  Backend: {}",
        health.status, health.backend
    );
    if let Some(guests) = health.guests {
        output.push_str(&format!("\n  Guests: {}", guests));
    }
    if let Some(error) = &health.error {
        output.push_str(&format!("\n  Error: {}", error));
    }
    output
}
