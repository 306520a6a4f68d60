/// Wire types for the image search API
///
/// These structs mirror the JSON the Pixabay API returns. Field names on
/// the wire are camelCase (`totalHits`, `webformatURL`), so serde renames
/// map them onto idiomatic Rust names.

use serde::Deserialize;

/// One page of search results as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    /// Total number of hits the API will actually serve for this query
    #[serde(rename = "totalHits")]
    pub total_hits: u32,
    /// The image records on this page, in API order
    pub hits: Vec<ImageRecord>,
}

/// A single image result
///
/// Read-only, externally sourced, rendered verbatim. The thumbnail URL
/// points at a medium-size web format, the full URL at the large image
/// shown in the lightbox.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRecord {
    /// URL of the gallery-card thumbnail
    #[serde(rename = "webformatURL")]
    pub thumbnail_url: String,
    /// URL of the full-size image for the lightbox
    #[serde(rename = "largeImageURL")]
    pub full_url: String,
    /// Comma-separated tag string, also used as the caption
    pub tags: String,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub downloads: u64,
}

/// Errors from the query client
///
/// `Clone` because these travel inside iced messages from background
/// fetch tasks back into `update`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout, ...)
    #[error("network error: {0}")]
    Network(String),
    /// The API answered with a non-success HTTP status
    #[error("API returned HTTP {0}")]
    Status(u16),
    /// The response body was not the JSON we expected
    #[error("invalid response payload: {0}")]
    Decode(String),
}
