/// Image search API access
///
/// This module talks to the Pixabay REST API:
/// - Wire types and deserialization (types.rs)
/// - The HTTP client itself (client.rs)

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{ApiError, ImageRecord, SearchPage};
