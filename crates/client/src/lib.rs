//! guestbook_client - CLI client for the guestbook API.

pub mod cli;
pub mod client;
pub mod error;
pub mod image;
pub mod output;

pub use client::GuestbookClient;
pub use error::{ClientError, Result};
