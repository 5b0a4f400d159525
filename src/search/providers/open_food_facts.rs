use crate::config::ProviderSettings;
use crate::food::{FoodSearchResult, FoodSource};
use crate::http::{self, HttpClient, HttpRequest};
use crate::search::{FoodSearchProvider, SearchError};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Open Food Facts product search provider
///
/// No API key required. Documentation: https://openfoodfacts.github.io/openfoodfacts-server/api/
pub struct OpenFoodFactsProvider {
    http: Arc<dyn HttpClient>,
    api_base: String,
    page_size: u32,
    source: FoodSource,
}

impl OpenFoodFactsProvider {
    pub const NAME: &'static str = "open-food-facts";

    pub fn new(
        http: Arc<dyn HttpClient>,
        settings: &ProviderSettings,
        page_size: u32,
        source: FoodSource,
    ) -> Self {
        Self {
            http,
            api_base: settings.base_url().trim_end_matches('/').to_string(),
            page_size,
            source,
        }
    }

    fn convert(&self, product: OffProduct) -> Option<FoodSearchResult> {
        let code = super::non_blank(product.code)?;
        let name = super::non_blank(product.product_name)?;

        // "brands" is a comma separated list; the first entry is the owner brand.
        let brand = product
            .brands
            .as_deref()
            .and_then(|b| b.split(',').next())
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        let nutriment = |key: &str| product.nutriments.get(key).and_then(super::loose_f64);

        Some(FoodSearchResult {
            id: format!("off_{code}"),
            name,
            brand,
            calories_per_100g: nutriment("energy-kcal_100g"),
            protein_per_100g: nutriment("proteins_100g"),
            carbs_per_100g: nutriment("carbohydrates_100g"),
            fat_per_100g: nutriment("fat_100g"),
            source: self.source,
        })
    }
}

#[async_trait::async_trait]
impl FoodSearchProvider for OpenFoodFactsProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn search_foods(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<FoodSearchResult>, SearchError> {
        tracing::debug!(
            query = %query,
            page,
            page_size = self.page_size,
            "performing open food facts search"
        );

        let request = HttpRequest::get(format!("{}/cgi/search.pl", self.api_base))
            .header("Accept", "application/json")
            .query("search_terms", query)
            .query("search_simple", 1)
            .query("action", "process")
            .query("json", 1)
            .query("page", page)
            .query("page_size", self.page_size);

        let response: OffSearchResponse = http::send_json(self.http.as_ref(), request)
            .await
            .map_err(|e| SearchError::from_http(Self::NAME, e))?;

        let total = response.products.len();
        let items: Vec<FoodSearchResult> = response
            .products
            .into_iter()
            .filter_map(|product| self.convert(product))
            .collect();

        if items.len() < total {
            tracing::trace!(skipped = total - items.len(), "dropped products without code or name");
        }
        tracing::debug!(
            query = %query,
            page,
            result_count = items.len(),
            "open food facts search completed"
        );

        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct OffSearchResponse {
    #[serde(default)]
    products: Vec<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    code: Option<String>,
    product_name: Option<String>,
    brands: Option<String>,
    #[serde(default)]
    nutriments: HashMap<String, serde_json::Value>,
}
