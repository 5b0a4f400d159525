use crate::food::{FoodSearchResult, FoodSource};
use crate::search::{FoodSearchProvider, SearchError};

/// Offline provider returning one deterministic item per page
pub struct StubProvider {
    source: FoodSource,
}

impl StubProvider {
    pub const NAME: &'static str = "stub";

    pub fn new(source: FoodSource) -> Self {
        Self { source }
    }
}

#[async_trait::async_trait]
impl FoodSearchProvider for StubProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn search_foods(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<FoodSearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let item = match self.source {
            FoodSource::Primary => {
                FoodSearchResult::new(format!("fdc_stub_{page}"), "Sample FDC Food", self.source)
                    .with_brand("FDC")
                    .with_nutrients(150.0, 8.0, 18.0, 5.0)
            }
            FoodSource::Secondary => {
                FoodSearchResult::new(format!("off_stub_{page}"), "Sample OFF Food", self.source)
                    .with_brand("Open Food Facts")
                    .with_nutrients(120.0, 4.0, 22.0, 2.0)
            }
        };

        Ok(vec![item])
    }
}
