//! Serde model of the upstream weekly menu document.
//!
//! Only the fields the normalizer reads are typed; everything that can arrive in
//! more than one shape stays a [`serde_json::Value`]. A field of the wrong shape
//! falls back to its default instead of failing the whole document.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub days: Vec<RawDay>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDay {
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub menu_items: Vec<RawMenuEntry>,

    #[serde(default, deserialize_with = "lenient_map")]
    pub menu_info: HashMap<String, RawMenuInfo>,
}

/// One row of a day's menu: either a section header or a food entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMenuEntry {
    #[serde(default)]
    pub is_section_title: Option<Value>,

    #[serde(default)]
    pub is_station_header: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,

    /// Numeric or string identifier into the day's `menu_info` table.
    #[serde(default)]
    pub menu_id: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub food: Option<RawFood>,
}

impl RawMenuEntry {
    pub fn is_header(&self) -> bool {
        truthy(self.is_section_title.as_ref()) || truthy(self.is_station_header.as_ref())
    }

    /// `menu_id` rendered the way `menu_info` keys are written.
    pub fn menu_key(&self) -> Option<String> {
        match self.menu_id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFood {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(default)]
    pub rounded_nutrition_info: Option<Value>,

    #[serde(default)]
    pub nutrition_info: Option<Value>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub food_sizes: Vec<RawFoodSize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFoodSize {
    #[serde(default)]
    pub nutrition_info: Option<Value>,

    #[serde(default)]
    pub rounded_nutrition_info: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMenuInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub section_options: Option<RawSectionOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSectionOptions {
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
}

/// Loose boolean flag: `false`, `0`, `""` and `null` are off, anything else is on.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Any value of the wrong shape becomes `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Non-arrays become empty; malformed elements become `T::default()` in place.
fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let Value::Array(values) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(values
        .into_iter()
        .map(|value| T::deserialize(value).unwrap_or_default())
        .collect())
}

/// Non-objects become empty; malformed values become `T::default()`.
fn lenient_map<'de, D, T>(deserializer: D) -> std::result::Result<HashMap<String, T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(HashMap::new());
    };
    Ok(entries
        .into_iter()
        .map(|(key, value)| (key, T::deserialize(value).unwrap_or_default()))
        .collect())
}
