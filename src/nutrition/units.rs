pub fn grams_to_kilograms(grams: f64) -> f64 {
    grams / 1000.0
}

pub fn kilograms_to_grams(kilograms: f64) -> f64 {
    kilograms * 1000.0
}

/// Number of servings in `grams`; zero when the serving size is not positive
pub fn servings_for_grams(grams: f64, grams_per_serving: f64) -> f64 {
    if grams_per_serving <= 0.0 {
        return 0.0;
    }
    grams / grams_per_serving
}

pub fn grams_for_servings(servings: f64, grams_per_serving: f64) -> f64 {
    servings * grams_per_serving
}
