//! Paginated search session.
//!
//! A [`SearchSession`] owns the state of one search interaction: the editable
//! query, the accumulated results and the flags a UI renders. Every fetch it
//! issues is stamped with a generation number; completions from a superseded
//! generation are discarded, so a slow response can never overwrite the state
//! of a newer search.
//!
//! Callers that can hold `&mut` across the await use [`SearchSession::perform_search`]
//! and [`SearchSession::load_more`]. Event loops split the work instead:
//! `begin_*` hands out a [`PendingFetch`], the fetch runs elsewhere (e.g. on a
//! spawned task) and the [`FetchCompletion`] is fed back through
//! [`SearchSession::complete`].

use crate::food::FoodSearchResult;
use crate::search::{FoodSearchRepository, SearchError};
use serde::Serialize;
use std::sync::Arc;

/// Coarse session state, derived from the session's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No query, or nothing found
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page of a fresh search; replaces results
    Search,
    /// Next page of the current search; appends results
    LoadMore,
}

/// A fetch issued by a session and not yet applied to it
#[derive(Debug, Clone)]
pub struct PendingFetch {
    generation: u64,
    kind: FetchKind,
    query: String,
    page: u32,
}

impl PendingFetch {
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the fetch against `repository`
    pub async fn run(self, repository: &dyn FoodSearchRepository) -> FetchCompletion {
        let outcome = repository.search(&self.query, self.page).await;
        FetchCompletion {
            fetch: self,
            outcome,
        }
    }
}

/// Result of a [`PendingFetch`], ready to hand back to its session
#[derive(Debug)]
pub struct FetchCompletion {
    fetch: PendingFetch,
    outcome: Result<Vec<FoodSearchResult>, SearchError>,
}

impl FetchCompletion {
    pub fn new(fetch: PendingFetch, outcome: Result<Vec<FoodSearchResult>, SearchError>) -> Self {
        Self { fetch, outcome }
    }

    pub fn fetch(&self) -> &PendingFetch {
        &self.fetch
    }
}

/// Point-in-time copy of everything a presentation layer observes
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub results: Vec<FoodSearchResult>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub can_load_more: bool,
}

pub struct SearchSession {
    repository: Arc<dyn FoodSearchRepository>,
    query: String,
    current_page: u32,
    results: Vec<FoodSearchResult>,
    is_loading: bool,
    error_message: Option<String>,
    can_load_more: bool,
    generation: u64,
}

impl SearchSession {
    pub fn new(repository: Arc<dyn FoodSearchRepository>) -> Self {
        Self {
            repository,
            query: String::new(),
            current_page: 1,
            results: Vec::new(),
            is_loading: false,
            error_message: None,
            can_load_more: false,
            generation: 0,
        }
    }

    pub fn repository(&self) -> Arc<dyn FoodSearchRepository> {
        Arc::clone(&self.repository)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text. Takes effect on the next search or load-more.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn results(&self) -> &[FoodSearchResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn can_load_more(&self) -> bool {
        self.can_load_more
    }

    /// Last page successfully applied (1-based)
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn state(&self) -> SessionState {
        if self.is_loading {
            SessionState::Loading
        } else if self.error_message.is_some() {
            SessionState::Error
        } else if self.results.is_empty() {
            SessionState::Idle
        } else {
            SessionState::Loaded
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            results: self.results.clone(),
            is_loading: self.is_loading,
            error_message: self.error_message.clone(),
            can_load_more: self.can_load_more,
        }
    }

    /// Start a fresh search for the current query and wait for it.
    pub async fn perform_search(&mut self) {
        if let Some(fetch) = self.begin_search() {
            let repository = self.repository();
            let completion = fetch.run(repository.as_ref()).await;
            self.complete(completion);
        }
    }

    /// Fetch and append the next page, if one may be loaded.
    pub async fn load_more(&mut self) {
        if let Some(fetch) = self.begin_load_more() {
            let repository = self.repository();
            let completion = fetch.run(repository.as_ref()).await;
            self.complete(completion);
        }
    }

    /// Enter the loading state for page 1 of the current query.
    ///
    /// A blank query resets the session and returns `None`. Any fetch still
    /// in flight becomes stale.
    pub fn begin_search(&mut self) -> Option<PendingFetch> {
        let trimmed = self.query.trim().to_string();
        if trimmed.is_empty() {
            self.reset();
            return None;
        }

        self.current_page = 1;
        Some(self.issue(FetchKind::Search, trimmed, 1))
    }

    /// Enter the loading state for the next page.
    ///
    /// Returns `None` without touching any state while a fetch is in flight
    /// or after the last page came back empty or failed.
    pub fn begin_load_more(&mut self) -> Option<PendingFetch> {
        if self.is_loading || !self.can_load_more {
            return None;
        }

        let trimmed = self.query.trim().to_string();
        if trimmed.is_empty() {
            self.reset();
            return None;
        }

        let next_page = self.current_page + 1;
        Some(self.issue(FetchKind::LoadMore, trimmed, next_page))
    }

    /// Apply a finished fetch. Returns `false` if it was stale and ignored.
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { fetch, outcome } = completion;

        if fetch.generation != self.generation {
            tracing::debug!(
                generation = fetch.generation,
                current = self.generation,
                page = fetch.page,
                "discarding stale search completion"
            );
            return false;
        }

        self.is_loading = false;

        match (fetch.kind, outcome) {
            (FetchKind::Search, Ok(page)) => {
                self.can_load_more = !page.is_empty();
                self.results = page;
                self.current_page = fetch.page;
            }
            (FetchKind::Search, Err(e)) => {
                tracing::warn!(query = %fetch.query, error = %e, "search failed");
                self.results.clear();
                self.can_load_more = false;
                self.error_message = Some(e.to_string());
            }
            (FetchKind::LoadMore, Ok(page)) => {
                self.current_page = fetch.page;
                self.can_load_more = !page.is_empty();
                self.results.extend(page);
            }
            (FetchKind::LoadMore, Err(e)) => {
                tracing::warn!(
                    query = %fetch.query,
                    page = fetch.page,
                    error = %e,
                    "load more failed"
                );
                self.can_load_more = false;
                self.error_message = Some(e.to_string());
            }
        }

        tracing::debug!(
            query = %fetch.query,
            page = self.current_page,
            result_count = self.results.len(),
            can_load_more = self.can_load_more,
            "search session updated"
        );
        true
    }

    fn issue(&mut self, kind: FetchKind, query: String, page: u32) -> PendingFetch {
        self.generation += 1;
        self.is_loading = true;
        self.error_message = None;
        // Load-more stays disabled until this fetch lands.
        self.can_load_more = false;

        tracing::debug!(
            query = %query,
            page,
            kind = ?kind,
            generation = self.generation,
            "issuing search fetch"
        );

        PendingFetch {
            generation: self.generation,
            kind,
            query,
            page,
        }
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.results.clear();
        self.can_load_more = false;
        self.is_loading = false;
        self.error_message = None;
    }
}
