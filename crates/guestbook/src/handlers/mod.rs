pub mod error;
pub mod guests;
pub mod health;
pub mod images;

pub use error::ApiError;
