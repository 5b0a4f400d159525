/// Energy per gram of protein or carbohydrate (kcal)
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Energy per gram of fat (kcal)
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Share of total calories contributed by each macro, in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MacroPercentages {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Total calories for the given grams of protein, carbs and fat
pub fn calories(protein: f64, carbs: f64, fat: f64) -> f64 {
    protein * KCAL_PER_GRAM_PROTEIN + carbs * KCAL_PER_GRAM_CARBS + fat * KCAL_PER_GRAM_FAT
}

/// Calorie distribution across macros.
///
/// Returns all zeros when the total is not positive.
pub fn macro_percentages(protein: f64, carbs: f64, fat: f64) -> MacroPercentages {
    let total = calories(protein, carbs, fat);
    if total <= 0.0 {
        return MacroPercentages::default();
    }

    MacroPercentages {
        protein: protein * KCAL_PER_GRAM_PROTEIN / total,
        carbs: carbs * KCAL_PER_GRAM_CARBS / total,
        fat: fat * KCAL_PER_GRAM_FAT / total,
    }
}
