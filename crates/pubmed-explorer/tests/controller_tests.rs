//! End-to-end controller flows over a mocked backend.

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pubmed_explorer::client::ExplorerClient;
use pubmed_explorer::config::Config;
use pubmed_explorer::models::SortBy;
use pubmed_explorer::search::{SearchController, SearchForm, SearchPhase};
use pubmed_explorer::store::{HistoryStore, JsonStore};

/// Controller wired to a mock backend and a throwaway history directory.
fn setup(mock_server: &MockServer, dir: &TempDir) -> SearchController {
    let client = ExplorerClient::new(Config::for_testing(&mock_server.uri())).unwrap();
    let history = HistoryStore::new(JsonStore::new(dir.path()));
    SearchController::new(client, history)
}

fn form(query: &str) -> SearchForm {
    SearchForm { query: query.to_string(), ..SearchForm::default() }
}

fn paper_json(pmid: &str) -> serde_json::Value {
    json!({
        "pmid": pmid,
        "title": format!("Paper {pmid}"),
        "authors": ["Kim J"],
        "abstract": "",
        "pub_date": "2024",
        "journal": "J",
        "keywords": []
    })
}

fn search_body(total: u64, pmids: &[&str]) -> serde_json::Value {
    json!({
        "total": total,
        "page": 1,
        "page_size": 20,
        "papers": pmids.iter().map(|p| paper_json(p)).collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn test_submit_search_records_history_and_loads() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "lung ct"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(3, &["1", "2", "3"])))
        .mount(&mock_server)
        .await;

    let mut controller = setup(&mock_server, &dir);
    controller.submit_search(form("lung ct")).await.unwrap();

    assert_eq!(controller.session().phase(), SearchPhase::Loaded);
    assert_eq!(controller.session().total(), 3);

    let history = controller.history().entries();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "lung ct");
    assert!(history[0].ai_query.is_none());
}

#[tokio::test]
async fn test_failed_search_preserves_previous_results() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(10, &["1"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "bad"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "PubMed timeout"})))
        .mount(&mock_server)
        .await;

    let mut controller = setup(&mock_server, &dir);
    controller.submit_search(form("good")).await.unwrap();
    assert_eq!(controller.session().total(), 10);

    let err = controller.submit_search(form("bad")).await.unwrap_err();
    assert_eq!(err.user_message(), "PubMed timeout");

    // Prior results stay on screen; the error is recorded on the session.
    let session = controller.session();
    assert_eq!(session.phase(), SearchPhase::Error);
    assert_eq!(session.total(), 10);
    assert_eq!(session.papers().len(), 1);
    assert_eq!(session.last_error(), Some("PubMed timeout"));

    // The failed search was still recorded in history (recorded before the fetch).
    let history = controller.history().entries();
    assert_eq!(history[0].query, "bad");
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn test_ai_search_records_generated_query() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/generate-query"))
        .and(body_partial_json(json!({"query": "newest AI for lung nodules"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "original_query": "newest AI for lung nodules",
            "pubmed_query": "(lung nodule) AND (AI)",
            "explanation": "why",
            "keywords": ["lung nodule"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "(lung nodule) AND (AI)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(2, &["1", "2"])))
        .mount(&mock_server)
        .await;

    let mut controller = setup(&mock_server, &dir);
    let generated = controller.submit_ai_search(form("newest AI for lung nodules")).await.unwrap();

    assert_eq!(generated.pubmed_query, "(lung nodule) AND (AI)");
    assert_eq!(controller.session().total(), 2);
    // The search ran with the generated query, not the question.
    assert_eq!(controller.session().params().query, "(lung nodule) AND (AI)");

    // History keeps the natural-language question plus the derived query.
    let history = controller.history().entries();
    assert_eq!(history[0].query, "newest AI for lung nodules");
    assert_eq!(history[0].ai_query.as_deref(), Some("(lung nodule) AND (AI)"));
}

#[tokio::test]
async fn test_change_sort_resets_page_without_history_entry() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("sort_by", "relevance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(97, &["1"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("sort_by", "date"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(97, &["9"])))
        .mount(&mock_server)
        .await;

    let mut controller = setup(&mock_server, &dir);
    controller.submit_search(form("q")).await.unwrap();
    controller.go_to_page(3).await.unwrap();
    assert_eq!(controller.session().page(), 3);

    controller.change_sort(SortBy::Date).await.unwrap();
    assert_eq!(controller.session().page(), 1);
    assert_eq!(controller.session().papers()[0].pmid, "9");

    // Only the original submit recorded history.
    assert_eq!(controller.history().entries().len(), 1);
}

#[tokio::test]
async fn test_go_to_page_keeps_selection_and_rejects_out_of_range() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(97, &["1", "2"])))
        .mount(&mock_server)
        .await;

    let mut controller = setup(&mock_server, &dir);
    controller.submit_search(form("q")).await.unwrap();
    controller.session_mut().toggle_selection("1");

    controller.go_to_page(2).await.unwrap();
    assert!(controller.session().selection().contains("1"));

    let err = controller.go_to_page(6).await.unwrap_err();
    assert!(err.to_string().contains("out of range"));
    // No history entries beyond the original submit.
    assert_eq!(controller.history().entries().len(), 1);
}

#[tokio::test]
async fn test_empty_query_reaches_backend() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", ""))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "query is required"})),
        )
        .mount(&mock_server)
        .await;

    let mut controller = setup(&mock_server, &dir);
    // No client-side rejection: the backend is the validator of record.
    let err = controller.submit_search(form("")).await.unwrap_err();
    assert_eq!(err.user_message(), "query is required");
}
