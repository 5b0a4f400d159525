use super::{FoodSearchProvider, FoodSearchRepository, SearchError};
use crate::food::FoodSearchResult;
use std::collections::HashSet;
use std::sync::Arc;

/// Queries the primary provider and falls back to the secondary one only when
/// the primary fails. Results from the two providers are never merged.
#[derive(Clone)]
pub struct FallbackSearchAggregator {
    primary: Arc<dyn FoodSearchProvider>,
    secondary: Arc<dyn FoodSearchProvider>,
}

impl FallbackSearchAggregator {
    pub fn new(
        primary: Arc<dyn FoodSearchProvider>,
        secondary: Arc<dyn FoodSearchProvider>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Search `query` (trimmed here) for the given 1-based page.
    ///
    /// Blank queries return an empty page without touching either provider.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<FoodSearchResult>, SearchError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        match self.primary.search_foods(trimmed, page).await {
            Ok(results) => {
                tracing::debug!(
                    provider = self.primary.name(),
                    query = %trimmed,
                    page,
                    result_count = results.len(),
                    "primary provider answered"
                );
                Ok(dedup_by_id(results))
            }
            Err(primary_err) => {
                tracing::warn!(
                    provider = self.primary.name(),
                    fallback = self.secondary.name(),
                    error = %primary_err,
                    "primary provider failed, falling back"
                );

                let results = self.secondary.search_foods(trimmed, page).await?;
                tracing::debug!(
                    provider = self.secondary.name(),
                    query = %trimmed,
                    page,
                    result_count = results.len(),
                    "secondary provider answered"
                );
                Ok(dedup_by_id(results))
            }
        }
    }
}

#[async_trait::async_trait]
impl FoodSearchRepository for FallbackSearchAggregator {
    async fn search(&self, query: &str, page: u32) -> Result<Vec<FoodSearchResult>, SearchError> {
        FallbackSearchAggregator::search(self, query, page).await
    }
}

/// Drop later items whose `id` was already seen, keeping first occurrences in order
pub fn dedup_by_id(results: Vec<FoodSearchResult>) -> Vec<FoodSearchResult> {
    let mut seen = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}
