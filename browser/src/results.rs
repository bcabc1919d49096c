//! In-memory result accumulation for one browse session.

use api_client::MediaItem;

/// How a fetched page is merged into the current result sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Discard the prior sequence and adopt the page verbatim.
    Replace,
    /// Concatenate the page after the existing sequence.
    Append,
}

/// Ordered media items for the active browse session. Insertion order is
/// server order, preserved across appended pages. No deduplication: if
/// the upstream API returns overlapping items across calls, duplicates
/// surface verbatim.
#[derive(Debug, Default, Clone)]
pub struct ResultSet {
    items: Vec<MediaItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, page: Vec<MediaItem>, mode: ApplyMode) {
        match mode {
            ApplyMode::Replace => self.items = page,
            ApplyMode::Append => self.items.extend(page),
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> MediaItem {
        MediaItem {
            id: id.into(),
            description: None,
            product_url: None,
            base_url: format!("https://example.com/{}", id),
            mime_type: None,
            media_metadata: None,
            filename: format!("{}.jpg", id),
        }
    }

    fn ids(set: &ResultSet) -> Vec<&str> {
        set.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_replace_adopts_page_verbatim() {
        let mut set = ResultSet::new();
        set.apply(vec![item("a"), item("b")], ApplyMode::Replace);
        set.apply(vec![item("c")], ApplyMode::Replace);
        assert_eq!(ids(&set), vec!["c"]);
    }

    #[test]
    fn test_append_preserves_both_orders() {
        let mut set = ResultSet::new();
        set.apply(vec![item("a"), item("b")], ApplyMode::Replace);
        set.apply(vec![item("c"), item("d")], ApplyMode::Append);
        assert_eq!(ids(&set), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_duplicates_survive_verbatim() {
        // Accepted upstream-consistency limitation: overlapping pages are
        // not deduplicated.
        let mut set = ResultSet::new();
        set.apply(vec![item("a"), item("b")], ApplyMode::Replace);
        set.apply(vec![item("b"), item("c")], ApplyMode::Append);
        assert_eq!(ids(&set), vec!["a", "b", "b", "c"]);
    }

    #[test]
    fn test_append_empty_page_is_noop() {
        let mut set = ResultSet::new();
        set.apply(vec![item("a")], ApplyMode::Replace);
        set.apply(Vec::new(), ApplyMode::Append);
        assert_eq!(ids(&set), vec!["a"]);
    }
}
