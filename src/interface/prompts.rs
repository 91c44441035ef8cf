use dialoguer::{Confirm, Input, Select};

use crate::error::{MenuError, Result};
use crate::menu::parse_number_str;
use crate::models::{Macro, NutritionGoals, ScoringMode};

/// Prompt for one macro goal. An empty answer leaves it unset.
pub fn prompt_goal(which: Macro, unit: &str) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt(format!("Target {} ({unit}, blank to skip)", which.label()))
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    parse_number_str(input)
        .map(Some)
        .ok_or_else(|| MenuError::InvalidInput(format!("Not a number: {input}")))
}

/// Fill in goals the user did not pass on the command line.
pub fn collect_goals(mut goals: NutritionGoals) -> Result<NutritionGoals> {
    if goals.calories.is_none() {
        goals.calories = prompt_goal(Macro::Calories, "kcal")?;
    }
    if goals.protein.is_none() {
        goals.protein = prompt_goal(Macro::Protein, "g")?;
    }
    if goals.carbs.is_none() {
        goals.carbs = prompt_goal(Macro::Carbs, "g")?;
    }
    if goals.fat.is_none() {
        goals.fat = prompt_goal(Macro::Fat, "g")?;
    }
    Ok(goals)
}

/// Prompt for the scoring mode, starting at `current`.
pub fn prompt_mode(current: ScoringMode) -> Result<ScoringMode> {
    let modes = [
        ScoringMode::Closest,
        ScoringMode::Under,
        ScoringMode::Over,
        ScoringMode::ProteinDensity,
    ];
    let labels: Vec<&str> = modes.iter().map(|m| m.as_str()).collect();
    let default = modes.iter().position(|m| *m == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Scoring mode")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(modes.get(selection).copied().unwrap_or(current))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
