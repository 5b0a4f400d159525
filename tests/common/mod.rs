//! Shared test doubles for search tests

#![allow(dead_code)]

use coach_potato::search::{FoodSearchProvider, FoodSearchRepository, SearchError};
use coach_potato::{FoodSearchResult, FoodSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Build a food result with nutrients filled in
pub fn food(id: &str, name: &str, source: FoodSource) -> FoodSearchResult {
    FoodSearchResult::new(id, name, source).with_nutrients(50.0, 1.0, 12.0, 0.2)
}

/// Provider that always answers with the same result (or the same failure)
/// and counts its calls
pub struct StaticProvider {
    name: &'static str,
    outcome: Result<Vec<FoodSearchResult>, String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, u32)>>,
}

impl StaticProvider {
    pub fn ok(name: &'static str, results: Vec<FoodSearchResult>) -> Self {
        Self {
            name,
            outcome: Ok(results),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &'static str, message: &str) -> Self {
        Self {
            name,
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (query, page) pairs received, in order
    pub fn seen(&self) -> Vec<(String, u32)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FoodSearchProvider for StaticProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn search_foods(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<FoodSearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((query.to_string(), page));
        match &self.outcome {
            Ok(results) => Ok(results.clone()),
            Err(message) => Err(SearchError::Other(anyhow::anyhow!(message.clone()))),
        }
    }
}

/// Repository returning canned pages; unknown pages are empty
#[derive(Default)]
pub struct FakeRepository {
    responses: Mutex<HashMap<u32, Vec<FoodSearchResult>>>,
    failing_pages: Mutex<Vec<u32>>,
    calls: AtomicUsize,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, page: u32, results: Vec<FoodSearchResult>) {
        self.responses.lock().unwrap().insert(page, results);
    }

    pub fn fail_page(&self, page: u32) {
        self.failing_pages.lock().unwrap().push(page);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FoodSearchRepository for FakeRepository {
    async fn search(&self, _query: &str, page: u32) -> Result<Vec<FoodSearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_pages.lock().unwrap().contains(&page) {
            return Err(SearchError::Other(anyhow::anyhow!("stubbed failure on page {page}")));
        }
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .unwrap_or_default())
    }
}
