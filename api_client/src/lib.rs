//! API client module for the Google Photos Library API.
//!
//! Thin I/O wrapper: every call is a single attempt against the REST
//! endpoints, with failures surfaced as [`ApiError`]. Pagination and
//! filter bookkeeping live in the `browser` crate.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Suffix appended to a `base_url` for the full-resolution download form.
const DOWNLOAD_SUFFIX: &str = "=d";
/// Suffix appended to a `base_url` for the fixed 200x200 preview form.
const PREVIEW_SUFFIX: &str = "=w200-h200";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub description: Option<String>,
    pub product_url: Option<String>,
    pub base_url: String,
    pub mime_type: Option<String>,
    pub media_metadata: Option<MediaMetadata>,
    pub filename: String,
}

impl MediaItem {
    /// Full-resolution download URL. The suffix convention is part of the
    /// Photos API contract and is not validated here.
    pub fn download_url(&self) -> String {
        format!("{}{}", self.base_url, DOWNLOAD_SUFFIX)
    }

    /// 200x200 preview URL, same suffix convention as [`download_url`].
    ///
    /// [`download_url`]: MediaItem::download_url
    pub fn preview_url(&self) -> String {
        format!("{}{}", self.base_url, PREVIEW_SUFFIX)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub creation_time: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: Option<String>,
    pub product_url: Option<String>,
    pub media_items_count: Option<String>,
    pub cover_photo_base_url: Option<String>,
}

/// Request body for `mediaItems:search`.
///
/// Exactly one of `album_id` or `filters` is populated per request; the
/// page size is always present and the page token only when continuing a
/// previous result set. Absent fields are omitted from the serialized
/// body entirely.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    pub page_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub date_filter: DateFilter,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    pub ranges: Vec<DateRange>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: FilterDate,
    pub end_date: FilterDate,
}

/// One endpoint of a date range. Components are forwarded verbatim as
/// strings; missing components are dropped from the serialized body, the
/// same way `undefined` fields disappear from a JSON payload.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct FilterDate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchMediaItemsResponse {
    media_items: Option<Vec<MediaItem>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAlbumsResponse {
    albums: Option<Vec<Album>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListSharedAlbumsResponse {
    shared_albums: Option<Vec<Album>>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// No access token available; the call fails before any network
    /// attempt is made.
    #[error("not authenticated: no access token available")]
    Unauthenticated,
    #[error("request error: {0}")]
    Request(String),
    #[error("invalid response: {0}")]
    Parse(String),
    #[error("Google API error: {0}")]
    Api(String),
}

pub struct ApiClient {
    client: reqwest::Client,
    access_token: Option<String>,
    base_url: String,
}

impl ApiClient {
    pub fn new(access_token: Option<String>) -> Self {
        Self::with_base_url(access_token, "https://photoslibrary.googleapis.com".to_string())
    }

    /// Create a client against a custom API base URL. Mainly used for
    /// testing against a local mock server.
    pub fn with_base_url(access_token: Option<String>, base_url: String) -> Self {
        ApiClient {
            client: reqwest::Client::new(),
            access_token,
            base_url,
        }
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn token(&self) -> Result<&str, ApiError> {
        self.access_token.as_deref().ok_or(ApiError::Unauthenticated)
    }

    /// POST `mediaItems:search` with the given query, returning the page
    /// items together with the server's next-page token, if any.
    pub async fn search_media_items(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<MediaItem>, Option<String>), ApiError> {
        let token = self.token()?;
        let url = format!("{}/v1/mediaItems:search", self.base_url);
        tracing::debug!(page_size = query.page_size, continuation = query.page_token.is_some(), "searching media items");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .json(query)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Api(error_text));
        }

        let search_response = response
            .json::<SearchMediaItemsResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok((
            search_response.media_items.unwrap_or_default(),
            search_response.next_page_token,
        ))
    }

    pub async fn list_albums(&self) -> Result<Vec<Album>, ApiError> {
        let body = self.get_json("/v1/albums").await?;
        let parsed: ListAlbumsResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(parsed.albums.unwrap_or_default())
    }

    pub async fn list_shared_albums(&self) -> Result<Vec<Album>, ApiError> {
        let body = self.get_json("/v1/sharedAlbums").await?;
        let parsed: ListSharedAlbumsResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(parsed.shared_albums.unwrap_or_default())
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        let token = self.token()?;
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(path, "listing albums");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Api(error_text));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
