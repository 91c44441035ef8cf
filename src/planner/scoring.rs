use crate::models::{Macro, MenuItem, NutritionGoals, ScoringMode};
use crate::planner::metrics::protein_per_cal;

/// Relative deviation of one macro from its goal under a goal-based mode.
fn deviation(value: f64, goal: f64, mode: ScoringMode) -> f64 {
    let divisor = if goal == 0.0 { 1.0 } else { goal };
    let gap = match mode {
        ScoringMode::Under => (value - goal).max(0.0),
        ScoringMode::Over => (goal - value).max(0.0),
        ScoringMode::Closest | ScoringMode::ProteinDensity => (value - goal).abs(),
    };
    gap / divisor
}

/// Score how well an item matches the goals. Lower is better.
///
/// Returns `None` when the item cannot be scored: no macro has both a goal and
/// a value, or (for protein density) the ratio is undefined.
pub fn score_item(item: &MenuItem, goals: &NutritionGoals, mode: ScoringMode) -> Option<f64> {
    if mode == ScoringMode::ProteinDensity {
        return protein_per_cal(item.protein, item.calories).map(|ratio| -ratio);
    }

    let (total, count) = Macro::ALL
        .iter()
        .filter_map(|&which| Some((item.macro_value(which)?, goals.get(which)?)))
        .fold((0.0, 0usize), |(total, count), (value, goal)| {
            (total + deviation(value, goal, mode), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}
