pub mod aggregator;
pub mod providers;

pub use aggregator::{dedup_by_id, FallbackSearchAggregator};

use crate::food::FoodSearchResult;
use crate::http::HttpError;

/// One upstream food-data source. Implementations may fail on any call.
#[async_trait::async_trait]
pub trait FoodSearchProvider: Send + Sync {
    /// Short provider name used in logs and error messages
    fn name(&self) -> &str;

    /// Fetch one page (1-based) of results for an already-trimmed, non-empty query
    async fn search_foods(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<FoodSearchResult>, SearchError>;
}

/// Paged food search as seen by a search session
#[async_trait::async_trait]
pub trait FoodSearchRepository: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<Vec<FoodSearchResult>, SearchError>;
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: HttpError,
    },

    #[error("{0}: invalid or missing API key")]
    InvalidApiKey(String),

    #[error("{0}: rate limit exceeded")]
    RateLimitExceeded(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl SearchError {
    /// Classify a transport error from `provider`, pulling auth and throttling
    /// statuses out into their own variants
    pub fn from_http(provider: &str, source: HttpError) -> Self {
        match &source {
            HttpError::Status { status: 401 | 403, .. } => {
                SearchError::InvalidApiKey(provider.to_string())
            }
            HttpError::Status { status: 429, .. } => {
                SearchError::RateLimitExceeded(provider.to_string())
            }
            _ => SearchError::Transport {
                provider: provider.to_string(),
                source,
            },
        }
    }
}
