//! Pure nutrition arithmetic: calories from macros, energy expenditure,
//! macro plans and unit conversion.

pub mod macros;
pub mod math;
pub mod units;

pub use macros::{MacroPlan, MacroPlanError, Sex};
pub use math::{calories, macro_percentages, MacroPercentages};
