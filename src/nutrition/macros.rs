//! Mifflin-St Jeor energy expenditure and macro targets.

use super::math::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use serde::{Deserialize, Serialize};

const RATIO_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Basal metabolic rate (kcal/day) for males
pub fn bmr_male(weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    base_bmr(weight_kg, height_cm, age_years) + 5.0
}

/// Basal metabolic rate (kcal/day) for females
pub fn bmr_female(weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    base_bmr(weight_kg, height_cm, age_years) - 161.0
}

pub fn bmr(sex: Sex, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    match sex {
        Sex::Male => bmr_male(weight_kg, height_cm, age_years),
        Sex::Female => bmr_female(weight_kg, height_cm, age_years),
    }
}

/// Total daily energy expenditure from a BMR and an activity multiplier
pub fn tdee(bmr: f64, activity_multiplier: f64) -> f64 {
    bmr * activity_multiplier
}

fn base_bmr(weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years)
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MacroPlanError {
    #[error("Macro ratios must sum to 1.0 (got {0})")]
    RatiosDoNotSumToOne(f64),

    #[error("Macro ratios must not be negative")]
    NegativeRatio,

    #[error("Calories and macro ratios must be finite numbers")]
    NotFinite,
}

/// Daily macro targets in grams derived from a calorie goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroPlan {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroPlan {
    /// Split `calories` across macros by ratio. Ratios must sum to 1.0.
    pub fn new(
        calories: f64,
        protein_ratio: f64,
        carb_ratio: f64,
        fat_ratio: f64,
    ) -> Result<Self, MacroPlanError> {
        if ![calories, protein_ratio, carb_ratio, fat_ratio]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(MacroPlanError::NotFinite);
        }
        if protein_ratio < 0.0 || carb_ratio < 0.0 || fat_ratio < 0.0 {
            return Err(MacroPlanError::NegativeRatio);
        }

        let sum = protein_ratio + carb_ratio + fat_ratio;
        if (sum - 1.0).abs() >= RATIO_TOLERANCE {
            return Err(MacroPlanError::RatiosDoNotSumToOne(sum));
        }

        Ok(Self {
            calories,
            protein: calories * protein_ratio / KCAL_PER_GRAM_PROTEIN,
            carbs: calories * carb_ratio / KCAL_PER_GRAM_CARBS,
            fat: calories * fat_ratio / KCAL_PER_GRAM_FAT,
        })
    }
}
