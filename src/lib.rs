//! Coach Potato food search
//!
//! Queries two nutrition data providers with primary/secondary fallback,
//! deduplicates results and drives paginated search sessions.

pub mod cli;
pub mod config;
pub mod container;
pub mod food;
pub mod http;
pub mod logging;
pub mod nutrition;
pub mod search;
pub mod session;

pub use container::AppContainer;
pub use food::{FoodDetail, FoodSearchResult, FoodSource};
pub use search::{FallbackSearchAggregator, FoodSearchProvider, FoodSearchRepository, SearchError};
pub use session::{SearchSession, SessionState};
