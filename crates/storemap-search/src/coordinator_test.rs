use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use futures::FutureExt;

use super::*;

/// Transport double: each issued request parks on a oneshot the test resolves
/// explicitly, so completion order is fully scripted.
#[derive(Clone, Default)]
struct ScriptedTransport {
    pending: Arc<Mutex<VecDeque<oneshot::Sender<Result<Vec<u8>, TransportError>>>>>,
}

impl ScriptedTransport {
    /// Resolves the oldest outstanding request. Resolving a request whose
    /// receiver was already aborted is a silent no-op, like a late response
    /// arriving for a cancelled transfer.
    fn resolve_next(&self, result: Result<Vec<u8>, TransportError>) {
        let sender = self
            .pending
            .lock()
            .unwrap()
            .pop_front()
            .expect("no pending request to resolve");
        let _ = sender.send(result);
    }
}

impl Transport for ScriptedTransport {
    fn issue(&self, _url: Url) -> BoxFuture<'static, Result<Vec<u8>, TransportError>> {
        let (sender, receiver) = oneshot::channel();
        self.pending.lock().unwrap().push_back(sender);
        async move { receiver.await.expect("request resolved or aborted") }.boxed()
    }
}

fn test_coordinator() -> (ScriptedTransport, SearchCoordinator<ScriptedTransport>) {
    let transport = ScriptedTransport::default();
    let coordinator = SearchCoordinator::new(
        transport.clone(),
        Url::parse("https://catalog.test/search").expect("static url"),
        200,
    );
    (transport, coordinator)
}

fn results_body(entries: &[(&str, i64)]) -> Vec<u8> {
    let results: Vec<serde_json::Value> = entries
        .iter()
        .map(|(name, priority)| {
            serde_json::json!({
                "name": name,
                "artistName": "Test Artist",
                "kind": "song",
                "priority": priority
            })
        })
        .collect();
    serde_json::to_vec(&serde_json::json!({
        "resultCount": results.len(),
        "results": results
    }))
    .expect("serializable body")
}

fn names(coordinator: &SearchCoordinator<ScriptedTransport>) -> Vec<String> {
    coordinator
        .session()
        .results
        .iter()
        .map(|result| result.name.clone())
        .collect()
}

#[test]
fn blank_query_is_a_no_op() {
    let (_, mut coordinator) = test_coordinator();
    assert!(coordinator.search("", Category::All).is_none());
    assert!(coordinator.search("   ", Category::All).is_none());
    assert_eq!(coordinator.session().status, SearchStatus::Idle);
    assert!(coordinator.session().query.is_empty());
}

#[test]
fn search_enters_loading_and_records_query() {
    let (_, mut coordinator) = test_coordinator();
    let pending = coordinator.search("  flat white  ", Category::Software);
    assert!(pending.is_some());
    let session = coordinator.session();
    assert_eq!(session.status, SearchStatus::Loading);
    assert_eq!(session.query, "flat white");
    assert_eq!(session.category, Category::Software);
    assert!(session.results.is_empty());
}

#[tokio::test]
async fn success_sorts_results_by_priority() {
    let (transport, mut coordinator) = test_coordinator();
    let pending = coordinator.search("jazz", Category::Music).unwrap();

    transport.resolve_next(Ok(results_body(&[("Gamma", 3), ("Alpha", 1), ("Beta", 2)])));
    let completion = pending.wait().await;

    assert_eq!(coordinator.apply(completion), Some(SearchStatus::Loaded));
    assert_eq!(names(&coordinator), ["Alpha", "Beta", "Gamma"]);
    assert_eq!(coordinator.session().status, SearchStatus::Loaded);
}

#[tokio::test]
async fn ties_keep_response_order() {
    let (transport, mut coordinator) = test_coordinator();
    let pending = coordinator.search("jazz", Category::All).unwrap();

    transport.resolve_next(Ok(results_body(&[("First", 2), ("Winner", 1), ("Second", 2)])));
    let completion = pending.wait().await;

    assert_eq!(coordinator.apply(completion), Some(SearchStatus::Loaded));
    assert_eq!(names(&coordinator), ["Winner", "First", "Second"]);
}

#[tokio::test]
async fn empty_result_array_yields_empty() {
    let (transport, mut coordinator) = test_coordinator();
    let pending = coordinator.search("xyzzy", Category::All).unwrap();

    transport.resolve_next(Ok(results_body(&[])));
    let completion = pending.wait().await;

    assert_eq!(coordinator.apply(completion), Some(SearchStatus::Empty));
    assert!(coordinator.session().results.is_empty());
}

#[tokio::test]
async fn malformed_body_yields_empty_not_error() {
    let (transport, mut coordinator) = test_coordinator();
    let pending = coordinator.search("anything", Category::All).unwrap();

    transport.resolve_next(Ok(b"<html>gateway timeout</html>".to_vec()));
    let completion = pending.wait().await;

    assert_eq!(coordinator.apply(completion), Some(SearchStatus::Empty));
}

#[tokio::test]
async fn transport_failure_yields_error_with_cleared_results() {
    let (transport, mut coordinator) = test_coordinator();
    let pending = coordinator.search("anything", Category::All).unwrap();

    transport.resolve_next(Err(TransportError::UnexpectedStatus {
        status: 500,
        url: "https://catalog.test/search".to_string(),
    }));
    let completion = pending.wait().await;

    assert_eq!(coordinator.apply(completion), Some(SearchStatus::Error));
    assert!(coordinator.session().results.is_empty());
}

#[tokio::test]
async fn superseding_search_ignores_the_older_request() {
    let (transport, mut coordinator) = test_coordinator();
    let pending_a = coordinator.search("a", Category::All).unwrap();
    let pending_b = coordinator.search("b", Category::All).unwrap();

    // The superseded request resolves as cancelled and must not touch state,
    // even if its response body later arrives at the (dead) receiver.
    let completion_a = pending_a.wait().await;
    assert!(coordinator.apply(completion_a).is_none());
    assert_eq!(coordinator.session().status, SearchStatus::Loading);
    transport.resolve_next(Ok(results_body(&[("Stale", 1)])));

    transport.resolve_next(Ok(results_body(&[("Fresh", 1)])));
    let completion_b = pending_b.wait().await;
    assert_eq!(coordinator.apply(completion_b), Some(SearchStatus::Loaded));
    assert_eq!(names(&coordinator), ["Fresh"]);
    assert_eq!(coordinator.session().query, "b");
}

#[test]
fn stale_completion_is_dropped_by_sequence_identity() {
    let (_, mut coordinator) = test_coordinator();
    let pending_a = coordinator.search("a", Category::All).unwrap();
    let seq_a = pending_a.seq;
    let _pending_b = coordinator.search("b", Category::All).unwrap();

    // A successful outcome wearing a superseded sequence number must be
    // dropped even though it was never marked cancelled.
    let stale = SearchCompletion {
        seq: seq_a,
        outcome: Outcome::Finished(Ok(results_body(&[("Stale", 1)]))),
    };
    assert!(coordinator.apply(stale).is_none());
    assert_eq!(coordinator.session().status, SearchStatus::Loading);
    assert!(coordinator.session().results.is_empty());
}

#[tokio::test]
async fn error_is_signalled_exactly_once() {
    let (transport, mut coordinator) = test_coordinator();
    let pending = coordinator.search("anything", Category::All).unwrap();
    let seq = pending.seq;

    transport.resolve_next(Err(TransportError::UnexpectedStatus {
        status: 503,
        url: "https://catalog.test/search".to_string(),
    }));
    let completion = pending.wait().await;
    assert_eq!(coordinator.apply(completion), Some(SearchStatus::Error));

    // A duplicate terminal completion for the same request finds the
    // in-flight record already consumed and is dropped.
    let duplicate = SearchCompletion {
        seq,
        outcome: Outcome::Finished(Err(TransportError::UnexpectedStatus {
            status: 503,
            url: "https://catalog.test/search".to_string(),
        })),
    };
    assert!(coordinator.apply(duplicate).is_none());
    assert_eq!(coordinator.session().status, SearchStatus::Error);
}

// ---------------------------------------------------------------------------
// build_search_url
// ---------------------------------------------------------------------------

#[test]
fn build_search_url_appends_term_and_limit() {
    let base = Url::parse("https://catalog.test/search").unwrap();
    let url = build_search_url(&base, "coffee", Category::All, 200);
    assert_eq!(url.as_str(), "https://catalog.test/search?term=coffee&limit=200");
}

#[test]
fn build_search_url_encodes_special_characters() {
    let base = Url::parse("https://catalog.test/search").unwrap();
    let url = build_search_url(&base, "flat white & co", Category::All, 10);
    assert!(
        url.as_str().contains("flat+white+%26+co") || url.as_str().contains("flat%20white%20%26%20co"),
        "term should be percent-encoded: {url}"
    );
}

#[test]
fn build_search_url_adds_entity_for_narrowing_categories() {
    let base = Url::parse("https://catalog.test/search").unwrap();
    let url = build_search_url(&base, "wolf hall", Category::Ebooks, 200);
    assert!(url.as_str().ends_with("&entity=ebook"), "got {url}");
}

#[test]
fn build_search_url_omits_entity_for_all() {
    let base = Url::parse("https://catalog.test/search").unwrap();
    let url = build_search_url(&base, "wolf hall", Category::All, 200);
    assert!(!url.as_str().contains("entity="), "got {url}");
}
