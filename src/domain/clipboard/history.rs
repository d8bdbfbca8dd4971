//! Bounded, ordered clipboard history

use uuid::Uuid;

use super::content::{ClipboardContent, ContentFilter};
use super::item::ClipboardItem;

/// Allowed range for the history depth setting
pub const MIN_HISTORY_DEPTH: usize = 1;
pub const MAX_HISTORY_DEPTH: usize = 100;

/// Bounded most-recent-first collection of clipboard items.
///
/// Index 0 is always the most recent entry. After any mutation the
/// length never exceeds the configured depth.
#[derive(Debug)]
pub struct HistoryStore {
    items: Vec<ClipboardItem>,
    depth: usize,
}

impl HistoryStore {
    /// Create an empty store; `depth` is clamped to the allowed range
    pub fn new(depth: usize) -> Self {
        Self {
            items: Vec::new(),
            depth: depth.clamp(MIN_HISTORY_DEPTH, MAX_HISTORY_DEPTH),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// All items, most recent first
    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    /// Insert new content at the front.
    ///
    /// Content equal to the current front entry is dropped (returns
    /// false); otherwise the store is trimmed from the tail to stay
    /// within depth and true is returned.
    pub fn insert(&mut self, content: ClipboardContent) -> bool {
        if let Some(front) = self.items.first() {
            if front.content == content {
                return false;
            }
        }

        self.items.insert(0, ClipboardItem::new(content));
        self.items.truncate(self.depth);
        true
    }

    /// Move the item with `id` to the front; no-op if absent or
    /// already at index 0.
    pub fn move_to_top(&mut self, id: Uuid) {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return;
        };
        if index == 0 {
            return;
        }
        let item = self.items.remove(index);
        self.items.insert(0, item);
    }

    /// Remove the item at `index`; returns false when out of range
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Drop all items
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Filtered, searched view of the history; order preserved.
    ///
    /// The search is a case-insensitive substring match over each
    /// item's preview text. Never errors; an empty view is a valid
    /// result.
    pub fn query(&self, filter: ContentFilter, search: &str) -> Vec<&ClipboardItem> {
        let needle = search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| filter.matches(&item.content))
            .filter(|item| {
                needle.is_empty() || item.content.preview_text().to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ClipboardContent {
        ClipboardContent::Text(s.to_string())
    }

    #[test]
    fn depth_is_clamped() {
        assert_eq!(HistoryStore::new(0).depth(), 1);
        assert_eq!(HistoryStore::new(10).depth(), 10);
        assert_eq!(HistoryStore::new(5000).depth(), 100);
    }

    #[test]
    fn insert_puts_newest_first() {
        let mut store = HistoryStore::new(10);
        assert!(store.insert(text("a")));
        assert!(store.insert(text("b")));
        assert_eq!(store.items()[0].content, text("b"));
        assert_eq!(store.items()[1].content, text("a"));
    }

    #[test]
    fn duplicate_of_front_is_rejected() {
        let mut store = HistoryStore::new(10);
        assert!(store.insert(text("x")));
        let front_id = store.items()[0].id;
        assert!(!store.insert(text("x")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].id, front_id);
    }

    #[test]
    fn duplicate_of_older_entry_is_inserted() {
        let mut store = HistoryStore::new(10);
        store.insert(text("a"));
        store.insert(text("b"));
        assert!(store.insert(text("a")));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn trims_to_depth_from_the_tail() {
        let mut store = HistoryStore::new(3);
        for s in ["a", "b", "c", "d"] {
            store.insert(text(s));
        }
        assert_eq!(store.len(), 3);
        let order: Vec<_> = store
            .items()
            .iter()
            .map(|i| i.content.preview_text())
            .collect();
        assert_eq!(order, vec!["d", "c", "b"]);
    }

    #[test]
    fn length_bounded_after_every_insert() {
        let mut store = HistoryStore::new(5);
        for i in 0..50 {
            store.insert(text(&format!("item-{}", i)));
            assert!(store.len() <= 5);
        }
    }

    #[test]
    fn move_to_top_reorders() {
        let mut store = HistoryStore::new(10);
        store.insert(text("c"));
        store.insert(text("b"));
        store.insert(text("a"));
        // top to bottom: a, b, c
        let c_id = store.items()[2].id;
        store.move_to_top(c_id);
        let order: Vec<_> = store
            .items()
            .iter()
            .map(|i| i.content.preview_text())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn move_to_top_is_idempotent() {
        let mut store = HistoryStore::new(10);
        store.insert(text("b"));
        store.insert(text("a"));
        let b_id = store.items()[1].id;
        store.move_to_top(b_id);
        let once: Vec<_> = store.items().iter().map(|i| i.id).collect();
        store.move_to_top(b_id);
        let twice: Vec<_> = store.items().iter().map(|i| i.id).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn move_to_top_unknown_id_is_noop() {
        let mut store = HistoryStore::new(10);
        store.insert(text("a"));
        let before: Vec<_> = store.items().iter().map(|i| i.id).collect();
        store.move_to_top(Uuid::new_v4());
        let after: Vec<_> = store.items().iter().map(|i| i.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut store = HistoryStore::new(10);
        store.insert(text("a"));
        assert!(!store.remove(5));
        assert_eq!(store.len(), 1);
        assert!(store.remove(0));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_empties_unconditionally() {
        let mut store = HistoryStore::new(10);
        store.insert(text("a"));
        store.insert(text("b"));
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn query_all_returns_everything_in_order() {
        let mut store = HistoryStore::new(10);
        store.insert(text("first"));
        store.insert(text("second"));
        let view = store.query(ContentFilter::All, "");
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].content, text("second"));
    }

    #[test]
    fn query_search_is_case_insensitive() {
        let mut store = HistoryStore::new(10);
        store.insert(text("Hello World"));
        store.insert(text("other"));
        let view = store.query(ContentFilter::All, "hello");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].content, text("Hello World"));
    }

    #[test]
    fn query_filter_restricts_variants() {
        let mut store = HistoryStore::new(10);
        store.insert(text("note"));
        store.insert(ClipboardContent::Image {
            data: vec![1, 2, 3],
            previewable: false,
        });
        let images = store.query(ContentFilter::Images, "");
        assert_eq!(images.len(), 1);
        assert!(matches!(images[0].content, ClipboardContent::Image { .. }));
    }

    #[test]
    fn query_result_is_subsequence_of_full_view() {
        let mut store = HistoryStore::new(10);
        for s in ["alpha", "beta", "alphabet", "gamma"] {
            store.insert(text(s));
        }
        let full: Vec<_> = store.query(ContentFilter::All, "").iter().map(|i| i.id).collect();
        let narrowed: Vec<_> = store
            .query(ContentFilter::All, "alpha")
            .iter()
            .map(|i| i.id)
            .collect();

        // Order-preserving subsequence check
        let mut cursor = full.iter();
        for id in &narrowed {
            assert!(cursor.any(|f| f == id));
        }
    }
}
