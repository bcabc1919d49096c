//! Library browsing core: filter construction, pagination reconciliation
//! and result accumulation for the Photos media search.
//!
//! The engine is pure state plus decisions; the network is reached only
//! through the [`PhotoSearch`] seam, implemented for
//! [`api_client::ApiClient`] and by test doubles.

mod filter;
mod results;
mod state;

pub use filter::{album_query, date_query, DEFAULT_PAGE_SIZE};
pub use results::{ApplyMode, ResultSet};
pub use state::{BrowseError, BrowserState, FilterKind, PageOutcome, PhotoSearch};
