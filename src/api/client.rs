/// HTTP client for the image search API
///
/// A thin fetch wrapper: build the query URL, send it, decode the JSON.
/// No retry logic lives here; failures are reported to the caller and
/// surfaced as notifications at the update boundary.

use super::types::{ApiError, SearchPage};

/// Base endpoint of the Pixabay REST API
const API_URL: &str = "https://pixabay.com/api/";

/// Query client for the search API
///
/// Cheap to clone (reqwest clients share their connection pool), which is
/// how it moves into background fetch tasks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_key: String,
    per_page: u32,
}

impl ApiClient {
    /// Build a client for the given API key
    pub fn new(api_key: String, per_page: u32) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pixgrid/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(ApiClient {
            http,
            api_key,
            per_page,
        })
    }

    /// How many results one page carries
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Fetch one page of search results
    ///
    /// `page` is 1-based, matching the API.
    pub async fn fetch_page(&self, query: String, page: u32) -> Result<SearchPage, ApiError> {
        let response = self
            .http
            .get(API_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("safesearch", "true"),
                ("page", page.to_string().as_str()),
                ("per_page", self.per_page.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetch raw image bytes (thumbnail or full-size)
    ///
    /// The browser original let `<img src>` do this implicitly; a native
    /// client downloads the bytes itself and hands them to the renderer.
    pub async fn fetch_image(&self, url: String) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
