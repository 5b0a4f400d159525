use serde::{Deserialize, Serialize};
use std::fmt;

/// Which upstream provider produced a result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    Primary,
    Secondary,
}

impl fmt::Display for FoodSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodSource::Primary => f.write_str("primary"),
            FoodSource::Secondary => f.write_str("secondary"),
        }
    }
}

/// One matched food item, normalized from a provider payload.
///
/// `id` is only unique within the namespace of the provider named by `source`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_per_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_per_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_per_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_per_100g: Option<f64>,
    pub source: FoodSource,
}

impl FoodSearchResult {
    pub fn new(id: impl Into<String>, name: impl Into<String>, source: FoodSource) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            calories_per_100g: None,
            protein_per_100g: None,
            carbs_per_100g: None,
            fat_per_100g: None,
            source,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set calories and macros per 100 g in one go
    pub fn with_nutrients(mut self, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        self.calories_per_100g = Some(calories);
        self.protein_per_100g = Some(protein);
        self.carbs_per_100g = Some(carbs);
        self.fat_per_100g = Some(fat);
        self
    }
}

/// Nutrient amounts for a concrete quantity of food
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientAmounts {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Detail view of a food: the search summary plus serving information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodDetail {
    pub summary: FoodSearchResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings_per_container: Option<f64>,
}

impl FoodDetail {
    pub fn new(summary: FoodSearchResult) -> Self {
        Self {
            summary,
            description: None,
            serving_size_grams: None,
            servings_per_container: None,
        }
    }

    /// Nutrients for an arbitrary weight, scaled from the per-100 g values
    pub fn nutrients_for_grams(&self, grams: f64) -> NutrientAmounts {
        let scale = |per_100g: Option<f64>| per_100g.map(|v| v * grams / 100.0);
        NutrientAmounts {
            calories: scale(self.summary.calories_per_100g),
            protein: scale(self.summary.protein_per_100g),
            carbs: scale(self.summary.carbs_per_100g),
            fat: scale(self.summary.fat_per_100g),
        }
    }

    /// Nutrients for one serving, if the serving size is known
    pub fn nutrients_per_serving(&self) -> Option<NutrientAmounts> {
        self.serving_size_grams
            .filter(|grams| *grams > 0.0)
            .map(|grams| self.nutrients_for_grams(grams))
    }

    /// Total weight of the container, if both serving fields are known
    pub fn container_grams(&self) -> Option<f64> {
        match (self.serving_size_grams, self.servings_per_container) {
            (Some(size), Some(count)) => {
                Some(crate::nutrition::units::grams_for_servings(count, size))
            }
            _ => None,
        }
    }
}
