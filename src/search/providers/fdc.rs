use crate::config::ProviderSettings;
use crate::food::{FoodSearchResult, FoodSource};
use crate::http::{self, HttpClient, HttpRequest};
use crate::search::{FoodSearchProvider, SearchError};
use serde::Deserialize;
use std::sync::Arc;

const NUTRIENT_ENERGY_KCAL: u32 = 1008;
const NUTRIENT_ENERGY_ATWATER_GENERAL: u32 = 2047;
const NUTRIENT_PROTEIN: u32 = 1003;
const NUTRIENT_FAT: u32 = 1004;
const NUTRIENT_CARBS: u32 = 1005;

/// USDA FoodData Central search provider
///
/// Documentation: https://fdc.nal.usda.gov/api-guide
/// `DEMO_KEY` works for light use; set FDC_API_KEY or `api_key` in the config
/// for anything else.
pub struct FdcProvider {
    http: Arc<dyn HttpClient>,
    api_base: String,
    api_key: String,
    page_size: u32,
    source: FoodSource,
}

impl FdcProvider {
    pub const NAME: &'static str = "fdc";

    pub fn new(
        http: Arc<dyn HttpClient>,
        settings: &ProviderSettings,
        page_size: u32,
        source: FoodSource,
    ) -> Self {
        Self {
            http,
            api_base: settings.base_url().trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            page_size,
            source,
        }
    }

    fn build_request(&self, query: &str, page: u32) -> HttpRequest {
        HttpRequest::get(format!("{}/v1/foods/search", self.api_base))
            .header("Accept", "application/json")
            .header("X-Api-Key", &self.api_key)
            .query("query", query)
            .query("pageNumber", page)
            .query("pageSize", self.page_size)
    }

    fn convert(&self, food: FdcFood) -> FoodSearchResult {
        let nutrient = |id: u32| {
            food.food_nutrients
                .iter()
                .find(|n| n.nutrient_id == Some(id))
                .and_then(|n| n.value)
        };

        let calories = nutrient(NUTRIENT_ENERGY_KCAL)
            .or_else(|| nutrient(NUTRIENT_ENERGY_ATWATER_GENERAL));
        let protein = nutrient(NUTRIENT_PROTEIN);
        let carbs = nutrient(NUTRIENT_CARBS);
        let fat = nutrient(NUTRIENT_FAT);

        FoodSearchResult {
            id: format!("fdc_{}", food.fdc_id),
            name: food.description.trim().to_string(),
            brand: super::non_blank(food.brand_name).or_else(|| super::non_blank(food.brand_owner)),
            calories_per_100g: calories,
            protein_per_100g: protein,
            carbs_per_100g: carbs,
            fat_per_100g: fat,
            source: self.source,
        }
    }
}

#[async_trait::async_trait]
impl FoodSearchProvider for FdcProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn search_foods(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<FoodSearchResult>, SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::InvalidApiKey(Self::NAME.to_string()));
        }

        tracing::debug!(query = %query, page, page_size = self.page_size, "performing fdc search");

        let response: FdcSearchResponse =
            http::send_json(self.http.as_ref(), self.build_request(query, page))
                .await
                .map_err(|e| SearchError::from_http(Self::NAME, e))?;

        let items: Vec<FoodSearchResult> =
            response.foods.into_iter().map(|food| self.convert(food)).collect();

        tracing::debug!(query = %query, page, result_count = items.len(), "fdc search completed");
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FdcSearchResponse {
    #[serde(default)]
    foods: Vec<FdcFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FdcFood {
    fdc_id: u64,
    description: String,
    brand_owner: Option<String>,
    brand_name: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<FdcNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FdcNutrient {
    nutrient_id: Option<u32>,
    value: Option<f64>,
}
