//! Pagination controller: decides fetch vs. reset vs. no-op for each
//! page request and owns the per-kind token bookkeeping.

use api_client::{ApiError, MediaItem, SearchQuery};
use thiserror::Error;

use crate::filter::{album_query, date_query, DEFAULT_PAGE_SIZE};
use crate::results::{ApplyMode, ResultSet};

/// Which browsing mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    None,
    Date,
    Album,
}

/// Seam over the search executor. Implemented for the real API client
/// and by scripted doubles in tests.
#[allow(async_fn_in_trait)]
pub trait PhotoSearch {
    async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<MediaItem>, Option<String>), ApiError>;
}

impl PhotoSearch for api_client::ApiClient {
    async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<MediaItem>, Option<String>), ApiError> {
        self.search_media_items(query).await
    }
}

/// All fetch failures surface through this single slot; the controller
/// state is guaranteed untouched when it is returned.
#[derive(Debug, Error)]
#[error("photo search failed: {0}")]
pub struct BrowseError(#[from] pub ApiError);

/// What a page request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Fresh search: the result set now holds exactly the fetched page.
    Replaced(usize),
    /// Continuation: the fetched page was appended to the result set.
    Appended(usize),
    /// Same filter, no token left: all pages fetched, nothing was done.
    Exhausted,
    /// No active browse session to continue.
    Idle,
}

/// Owned browse-session state. One page token and one last-applied value
/// per filter kind: each kind's cursor is tracked in its own slot, and
/// any kind or value change starts a fresh no-token fetch with replace
/// semantics. Continuation only happens when both the kind and the
/// last-applied value are unchanged.
///
/// State is mutated only after a successful fetch, so a failed request
/// never leaves tokens or last-values inconsistent with the last
/// successful state. Callers must keep at most one request in flight;
/// the controller does not self-serialize.
#[derive(Debug)]
pub struct BrowserState {
    active_kind: FilterKind,
    last_date_filter: String,
    last_album_id: Option<String>,
    date_token: Option<String>,
    album_token: Option<String>,
    page_size: i32,
    results: ResultSet,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: i32) -> Self {
        BrowserState {
            active_kind: FilterKind::None,
            last_date_filter: String::new(),
            last_album_id: None,
            date_token: None,
            album_token: None,
            page_size,
            results: ResultSet::new(),
        }
    }

    pub fn active_kind(&self) -> FilterKind {
        self.active_kind
    }

    /// Items accumulated for the active browse session, in server order.
    pub fn photos(&self) -> &[MediaItem] {
        self.results.items()
    }

    /// Continuation token for the active kind, derived on demand.
    pub fn current_token(&self) -> Option<&str> {
        match self.active_kind {
            FilterKind::Date => self.date_token.as_deref(),
            FilterKind::Album => self.album_token.as_deref(),
            FilterKind::None => None,
        }
    }

    /// Whether the active session has further pages to fetch.
    pub fn has_more(&self) -> bool {
        self.current_token().is_some()
    }

    /// Fetch a page of date-filtered photos.
    ///
    /// Same kind and unchanged filter value is a continuation: the stored
    /// token is used and the page appended, or, with no token left, the
    /// request is a no-op that never reaches the executor. Any kind or
    /// value change starts a fresh search with replace semantics.
    pub async fn request_date_page<C: PhotoSearch>(
        &mut self,
        client: &C,
        filter: &str,
    ) -> Result<PageOutcome, BrowseError> {
        let continuation =
            self.active_kind == FilterKind::Date && filter == self.last_date_filter;
        let token = if continuation {
            match &self.date_token {
                Some(token) => Some(token.clone()),
                None => {
                    tracing::debug!(filter, "all pages fetched");
                    return Ok(PageOutcome::Exhausted);
                }
            }
        } else {
            None
        };

        let query = date_query(filter, token, self.page_size);
        let (items, next_token) = client.search(&query).await?;
        let fetched = items.len();
        let mode = if continuation { ApplyMode::Append } else { ApplyMode::Replace };
        tracing::debug!(filter, fetched, continuation, "date page fetched");

        self.results.apply(items, mode);
        self.date_token = next_token;
        self.active_kind = FilterKind::Date;
        self.last_date_filter = filter.to_string();

        Ok(match mode {
            ApplyMode::Replace => PageOutcome::Replaced(fetched),
            ApplyMode::Append => PageOutcome::Appended(fetched),
        })
    }

    /// Structural mirror of [`request_date_page`], keyed on the album id
    /// and the album token.
    ///
    /// [`request_date_page`]: BrowserState::request_date_page
    pub async fn request_album_page<C: PhotoSearch>(
        &mut self,
        client: &C,
        album_id: &str,
    ) -> Result<PageOutcome, BrowseError> {
        let continuation = self.active_kind == FilterKind::Album
            && self.last_album_id.as_deref() == Some(album_id);
        let token = if continuation {
            match &self.album_token {
                Some(token) => Some(token.clone()),
                None => {
                    tracing::debug!(album_id, "all pages fetched");
                    return Ok(PageOutcome::Exhausted);
                }
            }
        } else {
            None
        };

        let query = album_query(album_id, token, self.page_size);
        let (items, next_token) = client.search(&query).await?;
        let fetched = items.len();
        let mode = if continuation { ApplyMode::Append } else { ApplyMode::Replace };
        tracing::debug!(album_id, fetched, continuation, "album page fetched");

        self.results.apply(items, mode);
        self.album_token = next_token;
        self.active_kind = FilterKind::Album;
        self.last_album_id = Some(album_id.to_string());

        Ok(match mode {
            ApplyMode::Replace => PageOutcome::Replaced(fetched),
            ApplyMode::Append => PageOutcome::Appended(fetched),
        })
    }

    /// Continue the active session with its stored filter value.
    pub async fn request_next_page<C: PhotoSearch>(
        &mut self,
        client: &C,
    ) -> Result<PageOutcome, BrowseError> {
        match self.active_kind {
            FilterKind::Date => {
                let filter = self.last_date_filter.clone();
                self.request_date_page(client, &filter).await
            }
            FilterKind::Album => match self.last_album_id.clone() {
                Some(album_id) => self.request_album_page(client, &album_id).await,
                None => Ok(PageOutcome::Idle),
            },
            FilterKind::None => Ok(PageOutcome::Idle),
        }
    }
}
