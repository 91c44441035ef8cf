use serde::{Deserialize, Serialize};

use crate::models::item::MenuItem;

/// A calorie-bounded selection of menu items with summary totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Selected items, in the order they were added.
    pub items: Vec<MenuItem>,

    pub target_calories: Option<f64>,

    pub total_calories: f64,

    pub total_protein: f64,

    pub total_carbs: f64,

    pub total_fat: f64,

    /// `total_calories - target_calories`, when a target was given.
    pub diff_calories: Option<f64>,

    pub protein_per_cal: Option<f64>,
}
