use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One of the four tracked macro quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macro {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl Macro {
    /// Fixed scoring order.
    pub const ALL: [Macro; 4] = [Macro::Calories, Macro::Protein, Macro::Carbs, Macro::Fat];

    pub fn label(self) -> &'static str {
        match self {
            Macro::Calories => "calories",
            Macro::Protein => "protein",
            Macro::Carbs => "carbs",
            Macro::Fat => "fat",
        }
    }
}

/// A single food entry served at one hall for one meal on one date.
///
/// Later pipeline stages never mutate an item in place; they build a new value
/// with the derived field filled in (see [`MenuItem::with_score`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,

    pub station: String,

    pub calories: Option<f64>,

    pub protein: Option<f64>,

    pub carbs: Option<f64>,

    pub fat: Option<f64>,

    /// Every reported nutrition field, keyed by a human-readable label.
    #[serde(default)]
    pub nutrition: BTreeMap<String, Value>,

    #[serde(default)]
    pub protein_per_cal: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall_slug: Option<String>,
}

impl MenuItem {
    /// Bare item with no nutrition data; mostly useful for building fixtures.
    pub fn new(name: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            station: station.into(),
            calories: None,
            protein: None,
            carbs: None,
            fat: None,
            nutrition: BTreeMap::new(),
            protein_per_cal: None,
            score: None,
            hall_id: None,
            hall_name: None,
            hall_slug: None,
        }
    }

    /// Raw value for a macro, if present and finite.
    pub fn macro_value(&self, which: Macro) -> Option<f64> {
        let value = match which {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        };
        value.filter(|v| v.is_finite())
    }

    /// Calories usable by the plan builder (finite and positive).
    #[inline]
    pub fn plannable_calories(&self) -> Option<f64> {
        self.macro_value(Macro::Calories).filter(|&c| c > 0.0)
    }

    pub fn with_score(&self, score: Option<f64>) -> Self {
        Self {
            score,
            ..self.clone()
        }
    }

    pub fn with_hall(&self, id: &str, name: &str, slug: &str) -> Self {
        Self {
            hall_id: Some(id.to_string()),
            hall_name: Some(name.to_string()),
            hall_slug: Some(slug.to_string()),
            ..self.clone()
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: cal {:?} P:{:?} C:{:?} F:{:?}",
            self.name, self.station, self.calories, self.protein, self.carbs, self.fat
        )
    }
}
