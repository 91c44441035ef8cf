pub mod aggregate;
pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod menu;
pub mod models;
pub mod planner;
pub mod source;

pub use error::{MenuError, Result};
pub use models::{MenuItem, NutritionGoals, Plan, ScoringMode};
