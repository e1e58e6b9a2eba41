//! guestbook_core - pure domain types and storage contracts for the guestbook.
//!
//! Nothing in this crate performs I/O. Storage backends and HTTP handlers live
//! in the `guestbook` crate; the admin CLI lives in `guestbook_client`.

pub mod guest;
pub mod serde;
pub mod storage;
