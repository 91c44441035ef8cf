pub mod goals;
pub mod item;
pub mod plan;
pub mod raw;

pub use goals::{NutritionGoals, ScoringMode};
pub use item::{Macro, MenuItem};
pub use plan::Plan;
pub use raw::{RawDay, RawDocument, RawFood, RawMenuEntry};
