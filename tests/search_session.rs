//! Pagination state machine of the search session

mod common;

use coach_potato::search::FoodSearchRepository;
use coach_potato::session::{FetchCompletion, FetchKind};
use coach_potato::{FallbackSearchAggregator, FoodSource, SearchSession, SessionState};
use common::{food, FakeRepository, StaticProvider};
use std::sync::Arc;

fn session_over(repo: &Arc<FakeRepository>) -> SearchSession {
    SearchSession::new(repo.clone())
}

#[tokio::test]
async fn test_blank_query_clears_state_without_fetching() {
    let repo = Arc::new(FakeRepository::new());
    let mut session = session_over(&repo);

    session.set_query("   ");
    session.perform_search().await;

    assert!(session.results().is_empty());
    assert!(!session.can_load_more());
    assert!(session.error_message().is_none());
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(repo.call_count(), 0);
}

#[tokio::test]
async fn test_blank_query_never_reaches_providers() {
    let primary = Arc::new(StaticProvider::ok("primary", vec![]));
    let secondary = Arc::new(StaticProvider::ok("secondary", vec![]));
    let mut session = SearchSession::new(Arc::new(FallbackSearchAggregator::new(
        primary.clone(),
        secondary.clone(),
    )));

    session.set_query(" \t ");
    session.perform_search().await;

    assert_eq!(primary.call_count(), 0);
    assert_eq!(secondary.call_count(), 0);
}

#[tokio::test]
async fn test_search_sets_results_and_can_load_more() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Orange", FoodSource::Primary)]);
    let mut session = session_over(&repo);

    session.set_query("orange");
    session.perform_search().await;

    assert_eq!(session.results().len(), 1);
    assert!(session.can_load_more());
    assert!(session.error_message().is_none());
    assert!(!session.is_loading());
    assert_eq!(session.state(), SessionState::Loaded);
}

#[tokio::test]
async fn test_empty_first_page_disables_load_more() {
    let repo = Arc::new(FakeRepository::new());
    let mut session = session_over(&repo);

    session.set_query("unobtainium");
    session.perform_search().await;

    assert!(session.results().is_empty());
    assert!(!session.can_load_more());
    assert_eq!(session.state(), SessionState::Idle);

    session.load_more().await;
    assert_eq!(repo.call_count(), 1);
}

#[tokio::test]
async fn test_load_more_appends_and_disables_when_empty() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Peach", FoodSource::Primary)]);
    repo.set_response(2, vec![]);
    let mut session = session_over(&repo);

    session.set_query("peach");
    session.perform_search().await;
    session.load_more().await;

    assert_eq!(session.results().len(), 1);
    assert!(!session.can_load_more());
    assert_eq!(session.current_page(), 2);

    // Exhausted: further load-more calls do nothing.
    session.load_more().await;
    assert_eq!(repo.call_count(), 2);
}

#[tokio::test]
async fn test_load_more_appends_pages_in_order() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Plum", FoodSource::Primary)]);
    repo.set_response(
        2,
        vec![
            food("2", "Plum jam", FoodSource::Primary),
            food("3", "Plum cake", FoodSource::Primary),
        ],
    );
    let mut session = session_over(&repo);

    session.set_query("plum");
    session.perform_search().await;
    session.load_more().await;

    let ids: Vec<&str> = session.results().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert!(session.can_load_more());
    assert_eq!(session.current_page(), 2);
}

#[tokio::test]
async fn test_load_more_is_noop_when_not_allowed() {
    let repo = Arc::new(FakeRepository::new());
    let mut session = session_over(&repo);
    session.set_query("melon");

    // Never searched: can_load_more is false.
    session.load_more().await;
    assert_eq!(repo.call_count(), 0);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.current_page(), 1);
}

#[tokio::test]
async fn test_load_more_rejected_while_loading() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Fig", FoodSource::Primary)]);
    let mut session = session_over(&repo);
    session.set_query("fig");
    session.perform_search().await;
    assert!(session.can_load_more());

    let in_flight = session.begin_load_more().expect("load more should start");
    assert!(session.is_loading());
    assert!(!session.can_load_more());

    let results_before = session.results().to_vec();
    assert!(session.begin_load_more().is_none());
    assert_eq!(session.results(), results_before.as_slice());
    assert!(session.is_loading());

    let completion = in_flight.run(repo.as_ref()).await;
    assert!(session.complete(completion));
    assert_eq!(repo.call_count(), 2);
}

#[tokio::test]
async fn test_search_failure_clears_results_and_records_error() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Lime", FoodSource::Primary)]);
    let mut session = session_over(&repo);
    session.set_query("lime");
    session.perform_search().await;
    assert_eq!(session.results().len(), 1);

    repo.fail_page(1);
    session.perform_search().await;

    assert!(session.results().is_empty());
    assert!(!session.can_load_more());
    assert!(!session.is_loading());
    assert!(session.error_message().unwrap().contains("stubbed failure"));
    assert_eq!(session.state(), SessionState::Error);
}

#[tokio::test]
async fn test_load_more_failure_preserves_results() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(
        1,
        vec![
            food("1", "Pear", FoodSource::Primary),
            food("2", "Nashi", FoodSource::Primary),
        ],
    );
    repo.fail_page(2);
    let mut session = session_over(&repo);

    session.set_query("pear");
    session.perform_search().await;
    session.load_more().await;

    assert_eq!(session.results().len(), 2);
    assert!(!session.can_load_more());
    assert!(session.error_message().is_some());
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.state(), SessionState::Error);
}

#[tokio::test]
async fn test_new_search_replaces_and_clears_error() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Cherry", FoodSource::Primary)]);
    repo.set_response(2, vec![food("2", "Cherry pie", FoodSource::Primary)]);
    repo.fail_page(3);
    let mut session = session_over(&repo);

    session.set_query("cherry");
    session.perform_search().await;
    session.load_more().await;
    session.load_more().await;
    assert_eq!(session.results().len(), 2);
    assert!(session.error_message().is_some());

    session.set_query("cherry tomato");
    session.perform_search().await;

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.current_page(), 1);
    assert!(session.error_message().is_none());
    assert!(session.can_load_more());
}

#[tokio::test]
async fn test_load_more_with_cleared_query_resets() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Grape", FoodSource::Primary)]);
    let mut session = session_over(&repo);
    session.set_query("grape");
    session.perform_search().await;

    session.set_query("  ");
    session.load_more().await;

    assert!(session.results().is_empty());
    assert!(!session.can_load_more());
    assert_eq!(repo.call_count(), 1);
}

#[tokio::test]
async fn test_stale_completion_is_ignored() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("new", "Newer", FoodSource::Primary)]);
    let mut session = session_over(&repo);

    session.set_query("old");
    let stale = session.begin_search().unwrap();

    session.set_query("new");
    let fresh = session.begin_search().unwrap();
    assert!(fresh.generation() > stale.generation());

    let fresh_done = fresh.run(repo.as_ref()).await;
    assert!(session.complete(fresh_done));

    // The older request lands late with different data.
    let late = FetchCompletion::new(stale, Ok(vec![food("old", "Older", FoodSource::Secondary)]));
    assert!(!session.complete(late));

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].id, "new");
}

#[tokio::test]
async fn test_search_supersedes_in_flight_load_more() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Mango", FoodSource::Primary)]);
    repo.set_response(2, vec![food("2", "Mango lassi", FoodSource::Primary)]);
    let mut session = session_over(&repo);
    session.set_query("mango");
    session.perform_search().await;

    let load_more = session.begin_load_more().unwrap();
    assert_eq!(load_more.kind(), FetchKind::LoadMore);
    assert_eq!(load_more.page(), 2);

    session.perform_search().await;
    let late = load_more.run(repo.as_ref()).await;
    assert!(!session.complete(late));

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.current_page(), 1);
    assert!(session.can_load_more());
}

#[tokio::test]
async fn test_reset_invalidates_in_flight_fetch() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Date", FoodSource::Primary)]);
    let mut session = session_over(&repo);

    session.set_query("date");
    let pending = session.begin_search().unwrap();
    session.set_query("");
    session.perform_search().await;
    assert!(!session.is_loading());

    let late = pending.run(repo.as_ref()).await;
    assert!(!session.complete(late));
    assert!(session.results().is_empty());
}

#[tokio::test]
async fn test_fetch_can_run_on_spawned_task() {
    let repo = Arc::new(FakeRepository::new());
    repo.set_response(1, vec![food("1", "Lychee", FoodSource::Primary)]);
    let mut session = session_over(&repo);
    session.set_query("lychee");

    let fetch = session.begin_search().unwrap();
    let repository: Arc<dyn FoodSearchRepository> = session.repository();
    let handle = tokio::spawn(async move { fetch.run(repository.as_ref()).await });

    let completion = handle.await.unwrap();
    assert!(session.complete(completion));
    assert_eq!(session.results()[0].name, "Lychee");
}
