use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::item::Macro;

/// Optional per-macro targets. Unset (or non-finite) dimensions are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionGoals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

impl NutritionGoals {
    /// Goal for one macro, if set to a finite number.
    pub fn get(&self, which: Macro) -> Option<f64> {
        let value = match which {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        };
        value.filter(|v| v.is_finite())
    }

    fn set(&mut self, which: Macro, value: Option<f64>) {
        match which {
            Macro::Calories => self.calories = value,
            Macro::Protein => self.protein = value,
            Macro::Carbs => self.carbs = value,
            Macro::Fat => self.fat = value,
        }
    }

    /// True when at least one dimension is set.
    pub fn any_set(&self) -> bool {
        Macro::ALL.iter().any(|&m| self.get(m).is_some())
    }

    /// Divide every set dimension evenly across `parts` meals.
    ///
    /// Unset dimensions stay unset. `parts == 0` is treated as one part.
    pub fn split(&self, parts: usize) -> Self {
        let count = parts.max(1) as f64;
        let mut split = Self::default();
        for which in Macro::ALL {
            split.set(which, self.get(which).map(|v| v / count));
        }
        split
    }
}

/// How items are compared against the goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// Penalize deviation in either direction.
    #[default]
    Closest,

    /// Penalize only exceeding a goal.
    Under,

    /// Penalize only falling short of a goal.
    Over,

    /// Rank purely by protein per calorie.
    ProteinDensity,
}

impl ScoringMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoringMode::Closest => "closest",
            ScoringMode::Under => "under",
            ScoringMode::Over => "over",
            ScoringMode::ProteinDensity => "protein-density",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
