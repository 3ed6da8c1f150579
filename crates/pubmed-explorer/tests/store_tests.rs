//! Collection store tests: bookmark and history invariants.

use tempfile::TempDir;

use pubmed_explorer::StoreError;
use pubmed_explorer::models::Paper;
use pubmed_explorer::store::{BookmarkStore, HistoryStore, JsonStore};

fn paper(pmid: &str, title: &str) -> Paper {
    Paper {
        pmid: pmid.to_string(),
        title: title.to_string(),
        authors: vec!["Kim J".to_string()],
        journal: "Radiology".to_string(),
        ..Paper::default()
    }
}

// =============================================================================
// Bookmarks
// =============================================================================

#[test]
fn test_upsert_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = BookmarkStore::new(JsonStore::new(dir.path()));

    let p = paper("100", "Original title");
    assert!(store.upsert(&p).unwrap());
    assert!(store.upsert(&p).unwrap());

    let entries = store.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].pmid, "100");
}

#[test]
fn test_upsert_does_not_refresh_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = BookmarkStore::new(JsonStore::new(dir.path()));

    store.upsert(&paper("100", "Original title")).unwrap();
    // Same pmid, changed upstream data: the stored snapshot must not change.
    store.upsert(&paper("100", "Revised title")).unwrap();

    assert_eq!(store.entries()[0].title, "Original title");
}

#[test]
fn test_toggle_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = BookmarkStore::new(JsonStore::new(dir.path()));

    let p = paper("100", "T");
    assert!(store.toggle(&p).unwrap());
    assert!(store.is_bookmarked("100"));

    assert!(!store.toggle(&p).unwrap());
    assert!(!store.is_bookmarked("100"));
    assert_eq!(store.count(), 0);
}

#[test]
fn test_remove_missing_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let store = BookmarkStore::new(JsonStore::new(dir.path()));

    assert!(!store.remove("nope").unwrap());
}

#[test]
fn test_clear_bookmarks() {
    let dir = TempDir::new().unwrap();
    let store = BookmarkStore::new(JsonStore::new(dir.path()));

    store.upsert(&paper("1", "A")).unwrap();
    store.upsert(&paper("2", "B")).unwrap();
    store.clear().unwrap();

    assert_eq!(store.count(), 0);
}

#[test]
fn test_bookmarks_persist_across_instances() {
    let dir = TempDir::new().unwrap();

    BookmarkStore::new(JsonStore::new(dir.path())).upsert(&paper("1", "A")).unwrap();

    let reopened = BookmarkStore::new(JsonStore::new(dir.path()));
    assert!(reopened.is_bookmarked("1"));
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_history_recency_and_dedup() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(JsonStore::new(dir.path()));

    store.add("a", None).unwrap();
    store.add("b", None).unwrap();
    store.add("a", None).unwrap();

    let queries: Vec<String> = store.entries().into_iter().map(|h| h.query).collect();
    assert_eq!(queries, vec!["a", "b"]);
}

#[test]
fn test_history_dedup_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(JsonStore::new(dir.path()));

    store.add("Lung CT", None).unwrap();
    store.add("lung ct", None).unwrap();

    assert_eq!(store.entries().len(), 2);
}

#[test]
fn test_history_bounded_at_twenty() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(JsonStore::new(dir.path()));

    for i in 0..25 {
        store.add(&format!("query {i}"), None).unwrap();
    }

    let entries = store.entries();
    assert_eq!(entries.len(), 20);
    // The 20 most recent survive; the oldest five were evicted.
    assert_eq!(entries[0].query, "query 24");
    assert_eq!(entries[19].query, "query 5");
}

#[test]
fn test_history_remove_by_index() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(JsonStore::new(dir.path()));

    store.add("a", None).unwrap();
    store.add("b", None).unwrap();

    // Most recent first: index 0 is "b".
    let removed = store.remove(0).unwrap();
    assert_eq!(removed.query, "b");
    assert_eq!(store.entries()[0].query, "a");
}

#[test]
fn test_history_remove_out_of_range_is_explicit() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(JsonStore::new(dir.path()));

    store.add("a", None).unwrap();

    match store.remove(5) {
        Err(StoreError::IndexOutOfRange { index: 5, len: 1 }) => {}
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }
    // The collection is untouched.
    assert_eq!(store.entries().len(), 1);
}

#[test]
fn test_history_keeps_ai_query() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(JsonStore::new(dir.path()));

    store.add("newest AI for nodules", Some("(nodule) AND (AI)")).unwrap();

    let entries = store.entries();
    assert_eq!(entries[0].ai_query.as_deref(), Some("(nodule) AND (AI)"));
}

#[test]
fn test_malformed_history_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("pubmed_search_history.json"), "not json at all").unwrap();

    let store = HistoryStore::new(JsonStore::new(dir.path()));
    assert!(store.entries().is_empty());

    // And it recovers on the next write.
    store.add("fresh", None).unwrap();
    assert_eq!(store.entries().len(), 1);
}

#[test]
fn test_clear_history() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(JsonStore::new(dir.path()));

    store.add("a", None).unwrap();
    store.clear().unwrap();
    assert!(store.entries().is_empty());
}
