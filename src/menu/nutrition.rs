use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::models::RawFood;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern compiles"));

/// Macros and the full nutrition table pulled from one food record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedNutrition {
    pub nutrition: BTreeMap<String, Value>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Lenient numeric coercion.
///
/// Numbers pass through; anything else is rendered as text and the first
/// unsigned decimal in it is used ("12g" -> 12, "<1" -> 1). Returns `None`
/// when there is nothing numeric to find.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number_str(s),
        other => parse_number_str(&other.to_string()),
    }
}

/// [`parse_number`] for text that never went through JSON (CLI input).
pub fn parse_number_str(text: &str) -> Option<f64> {
    let found = FIRST_NUMBER.find(text)?;
    found.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// First nutrition object in preference order; other shapes are skipped.
fn nutrition_source(food: &RawFood) -> Option<&Value> {
    let first_size = food.food_sizes.first();
    [
        food.rounded_nutrition_info.as_ref(),
        food.nutrition_info.as_ref(),
        first_size.and_then(|s| s.nutrition_info.as_ref()),
        first_size.and_then(|s| s.rounded_nutrition_info.as_ref()),
    ]
    .into_iter()
    .flatten()
    .find(|v| v.is_object())
}

/// Extract the nutrition table and the four macros from a raw food record.
pub fn extract_nutrition(food: &RawFood) -> ExtractedNutrition {
    let Some(info) = nutrition_source(food).and_then(Value::as_object) else {
        return ExtractedNutrition::default();
    };

    let nutrition = info
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.replace('_', " "), value.clone()))
        .collect();

    let field = |key: &str| info.get(key).and_then(parse_number);

    ExtractedNutrition {
        nutrition,
        calories: field("calories"),
        protein: field("g_protein"),
        carbs: field("g_carbs"),
        fat: field("g_fat"),
    }
}
