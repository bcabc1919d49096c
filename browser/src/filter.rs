//! Filter builder: turns raw user filter values into search query bodies.

use api_client::{DateFilter, DateRange, FilterDate, Filters, SearchQuery};

/// Items requested per page.
pub const DEFAULT_PAGE_SIZE: i32 = 20;

/// Build a date-range query from a raw `YYYY-MM-DD-YYYY-MM-DD` filter.
///
/// The raw value is split on `-` and mapped positionally: components 0-2
/// are the start date, 3-5 the end date. Nothing is validated; a filter
/// with too few components yields absent fields which are omitted from
/// the request body. Deliberately lenient, matching what the search
/// endpoint itself tolerates.
pub fn date_query(raw: &str, page_token: Option<String>, page_size: i32) -> SearchQuery {
    let parts: Vec<&str> = raw.split('-').collect();
    let component = |i: usize| parts.get(i).map(|s| s.to_string());

    SearchQuery {
        album_id: None,
        filters: Some(Filters {
            date_filter: DateFilter {
                ranges: vec![DateRange {
                    start_date: FilterDate {
                        year: component(0),
                        month: component(1),
                        day: component(2),
                    },
                    end_date: FilterDate {
                        year: component(3),
                        month: component(4),
                        day: component(5),
                    },
                }],
            },
        }),
        page_size,
        page_token,
    }
}

/// Build an album query for the given album identifier.
pub fn album_query(album_id: &str, page_token: Option<String>, page_size: i32) -> SearchQuery {
    SearchQuery {
        album_id: Some(album_id.to_string()),
        filters: None,
        page_size,
        page_token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_query_maps_components_positionally() {
        let query = date_query("2022-01-01-2022-01-31", None, DEFAULT_PAGE_SIZE);
        let range = &query.filters.as_ref().unwrap().date_filter.ranges[0];
        assert_eq!(range.start_date.year.as_deref(), Some("2022"));
        assert_eq!(range.start_date.month.as_deref(), Some("01"));
        assert_eq!(range.start_date.day.as_deref(), Some("01"));
        assert_eq!(range.end_date.year.as_deref(), Some("2022"));
        assert_eq!(range.end_date.month.as_deref(), Some("01"));
        assert_eq!(range.end_date.day.as_deref(), Some("31"));
        assert!(query.album_id.is_none());
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
        assert!(query.page_token.is_none());
    }

    #[test]
    fn test_malformed_date_filter_degrades_silently() {
        // Too few components: the tail of the range is simply absent.
        let query = date_query("2022-01", None, DEFAULT_PAGE_SIZE);
        let range = &query.filters.as_ref().unwrap().date_filter.ranges[0];
        assert_eq!(range.start_date.year.as_deref(), Some("2022"));
        assert_eq!(range.start_date.month.as_deref(), Some("01"));
        assert!(range.start_date.day.is_none());
        assert!(range.end_date.year.is_none());

        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(
            body["filters"]["dateFilter"]["ranges"][0]["endDate"],
            serde_json::json!({})
        );
    }

    #[test]
    fn test_page_token_attached_only_when_present() {
        let without = date_query("2022-01-01-2022-01-31", None, 20);
        assert!(without.page_token.is_none());
        let with = date_query("2022-01-01-2022-01-31", Some("T1".into()), 20);
        assert_eq!(with.page_token.as_deref(), Some("T1"));
    }

    #[test]
    fn test_album_query_wraps_identifier() {
        let query = album_query("album-7", Some("T2".into()), 50);
        assert_eq!(query.album_id.as_deref(), Some("album-7"));
        assert!(query.filters.is_none());
        assert_eq!(query.page_size, 50);
        assert_eq!(query.page_token.as_deref(), Some("T2"));
    }
}
