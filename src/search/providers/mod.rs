pub mod fdc;
pub mod open_food_facts;
pub mod stub;

pub use fdc::FdcProvider;
pub use open_food_facts::OpenFoodFactsProvider;
pub use stub::StubProvider;

/// Read a numeric field that upstream may encode as a number or a string
pub(crate) fn loose_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Treat blank strings from upstream as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
