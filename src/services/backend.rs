use crate::models::{Amenity, FilterSpec, Listing};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when fetching listings from the marketplace backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: backend rejected the API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Server-side filters forwarded to `GET /pgs`
///
/// The backend only understands a subset of the filter spec; everything
/// else is applied locally by the search pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub city: Option<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub amenities: Vec<Amenity>,
}

impl ListingQuery {
    pub fn from_spec(city: Option<&str>, spec: &FilterSpec) -> Self {
        let range = spec.price_range;
        Self {
            city: city
                .map(str::trim)
                .filter(|city| !city.is_empty())
                .map(str::to_string),
            min_price: (range.min > 0).then_some(range.min),
            max_price: (range.max < u32::MAX).then_some(range.max),
            amenities: spec.amenities.iter().copied().collect(),
        }
    }

    /// Encoded query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if let Some(city) = &self.city {
            params.push(format!("city={}", urlencoding::encode(city)));
        }
        if let Some(min) = self.min_price {
            params.push(format!("minPrice={}", min));
        }
        if let Some(max) = self.max_price {
            params.push(format!("maxPrice={}", max));
        }
        for amenity in &self.amenities {
            params.push(format!("{}=true", amenity.as_str()));
        }

        params.join("&")
    }
}

/// Marketplace backend API client
///
/// Fetches listing snapshots; the search pipeline runs over whatever the
/// backend returns.
pub struct BackendClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key: api_key.filter(|key| !key.is_empty()),
            client,
        })
    }

    /// Fetch a listing snapshot from `GET /pgs`
    ///
    /// Items that do not deserialize as listings are skipped with a warning
    /// rather than failing the whole snapshot.
    pub async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, BackendError> {
        let query_string = query.to_query_string();
        let mut url = format!("{}/pgs", self.base_url.trim_end_matches('/'));
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        tracing::debug!("Fetching listings from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(BackendError::Unauthorized);
            }
            StatusCode::NOT_FOUND => {
                return Err(BackendError::NotFound(format!("Listing endpoint {}", url)));
            }
            status => {
                return Err(BackendError::ApiError(format!(
                    "Failed to fetch listings: {}",
                    status
                )));
            }
        }

        let json: Value = response.json().await?;
        let documents = extract_documents(json)?;
        let total = documents.len();

        let listings: Vec<Listing> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<Listing>(doc) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    tracing::warn!("Skipping malformed listing: {}", e);
                    None
                }
            })
            .collect();

        if listings.len() < total {
            tracing::info!(
                "Parsed {} of {} listings returned by the backend",
                listings.len(),
                total
            );
        }

        Ok(listings)
    }
}

/// Pull the listing array out of the backend envelope
///
/// Accepts a bare array, `{ "data": [...] }`, `{ "pgs": [...] }` or
/// `{ "data": { "pgs": [...] } }`.
fn extract_documents(json: Value) -> Result<Vec<Value>, BackendError> {
    match json {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => {
            let inner = obj
                .remove("data")
                .or_else(|| obj.remove("pgs"))
                .ok_or_else(|| BackendError::InvalidResponse("Missing listings array".into()))?;

            match inner {
                Value::Array(items) => Ok(items),
                Value::Object(mut data) => match data.remove("pgs") {
                    Some(Value::Array(items)) => Ok(items),
                    _ => Err(BackendError::InvalidResponse("Missing listings array".into())),
                },
                _ => Err(BackendError::InvalidResponse("Listings field is not an array".into())),
            }
        }
        _ => Err(BackendError::InvalidResponse("Unexpected response body".into())),
    }
}
