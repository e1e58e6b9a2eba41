//! JSON file storage backend.
//!
//! All guests live in a single JSON document, `{"guests": [...]}`, that is
//! loaded once at startup and rewritten on every mutation. Writes go to a
//! sibling temp file that is renamed over the original, so a crash mid-write
//! leaves the previous document intact.

mod document;
mod repository;

pub use repository::FileRepository;
