//! History store behavior tests

use clipstack::domain::clipboard::{
    classify, ClipboardContent, ContentFilter, HistoryStore, PasteboardSnapshot,
};

fn text(s: &str) -> ClipboardContent {
    ClipboardContent::Text(s.to_string())
}

fn previews(store: &HistoryStore) -> Vec<String> {
    store
        .items()
        .iter()
        .map(|item| item.content.preview_text())
        .collect()
}

#[test]
fn depth_three_keeps_newest_three() {
    let mut store = HistoryStore::new(3);
    for s in ["a", "b", "c", "d"] {
        store.insert(text(s));
    }
    assert_eq!(previews(&store), vec!["d", "c", "b"]);
}

#[test]
fn repeated_insert_is_single_entry() {
    let mut store = HistoryStore::new(10);
    assert!(store.insert(text("x")));
    let first_id = store.items()[0].id;
    assert!(!store.insert(text("x")));
    assert_eq!(store.len(), 1);
    assert_eq!(store.items()[0].id, first_id);
}

#[test]
fn move_bottom_item_to_top() {
    let mut store = HistoryStore::new(10);
    store.insert(text("c"));
    store.insert(text("b"));
    store.insert(text("a"));
    let c_id = store.items()[2].id;
    store.move_to_top(c_id);
    assert_eq!(previews(&store), vec!["c", "a", "b"]);
}

#[test]
fn bounded_after_every_mutation() {
    let mut store = HistoryStore::new(7);
    for i in 0..200 {
        store.insert(text(&format!("entry {}", i)));
        assert!(store.len() <= 7);
    }
}

#[test]
fn query_composition_is_an_order_preserving_subsequence() {
    let mut store = HistoryStore::new(50);
    store.insert(text("grocery list"));
    store.insert(ClipboardContent::Url {
        url: "https://example.com/recipes".to_string(),
        fetched_title: None,
    });
    store.insert(text("meeting notes"));
    store.insert(ClipboardContent::Image {
        data: vec![1, 2, 3],
        previewable: false,
    });
    store.insert(text("shopping list"));

    let full: Vec<_> = store
        .query(ContentFilter::All, "")
        .iter()
        .map(|i| i.id)
        .collect();

    for (filter, search) in [
        (ContentFilter::All, "list"),
        (ContentFilter::Text, ""),
        (ContentFilter::Text, "LIST"),
        (ContentFilter::Urls, "recipes"),
        (ContentFilter::Images, ""),
    ] {
        let narrowed: Vec<_> = store.query(filter, search).iter().map(|i| i.id).collect();
        let mut cursor = full.iter();
        for id in &narrowed {
            assert!(
                cursor.any(|full_id| full_id == id),
                "query({:?}, {:?}) is not a subsequence of the full view",
                filter,
                search
            );
        }
    }
}

#[test]
fn search_matches_rich_text_by_plain_body() {
    let mut store = HistoryStore::new(10);
    store.insert(
        classify(PasteboardSnapshot::RichText {
            plain: "Quarterly Report".to_string(),
            rtf: vec![0xDE, 0xAD],
        })
        .unwrap(),
    );
    let hits = store.query(ContentFilter::Text, "quarterly");
    assert_eq!(hits.len(), 1);
}

#[test]
fn remove_then_query_stays_consistent() {
    let mut store = HistoryStore::new(10);
    store.insert(text("a"));
    store.insert(text("b"));
    assert!(store.remove(0));
    assert_eq!(previews(&store), vec!["a"]);
    assert!(store.query(ContentFilter::All, "b").is_empty());
}
