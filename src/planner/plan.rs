use tracing::{debug, trace};

use crate::models::{Macro, MenuItem, Plan};
use crate::planner::constants::default_tolerance;
use crate::planner::metrics::protein_per_cal;
use crate::planner::ranking::sort_by_protein_density;

/// Knobs for [`build_calorie_plan`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Calories allowed above the target. Defaults to `max(60, round(8%))`.
    pub tolerance: Option<f64>,
}

/// A candidate paired with its (positive, finite) calorie count.
struct Candidate<'a> {
    item: &'a MenuItem,
    calories: f64,
}

/// Pick a subset of items whose calories approach `target` without passing
/// `target + tolerance`.
///
/// Candidates are visited in protein-density order regardless of how the
/// caller ranked them. A greedy fill is followed by single-item additions
/// while one strictly improves the distance to the target. This is a
/// heuristic: no removals or swaps are tried.
///
/// Returns `None` when the target is not a positive number or nothing fits.
pub fn build_calorie_plan(
    items: &[MenuItem],
    target: Option<f64>,
    options: PlanOptions,
) -> Option<Vec<MenuItem>> {
    let target = target.filter(|t| t.is_finite() && *t > 0.0)?;

    let eligible: Vec<MenuItem> = items
        .iter()
        .filter(|item| item.plannable_calories().is_some())
        .cloned()
        .collect();
    let sorted = sort_by_protein_density(&eligible);
    let candidates: Vec<Candidate> = sorted
        .iter()
        .filter_map(|item| {
            Some(Candidate {
                item,
                calories: item.plannable_calories()?,
            })
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let tolerance = options.tolerance.unwrap_or_else(|| default_tolerance(target));
    let max_calories = target + tolerance;

    let mut used = vec![false; candidates.len()];
    let mut order: Vec<usize> = Vec::new();
    let mut total = 0.0;

    // Greedy fill
    for (idx, candidate) in candidates.iter().enumerate() {
        if total + candidate.calories <= max_calories {
            total += candidate.calories;
            used[idx] = true;
            order.push(idx);
            trace!(item = %candidate.item.debug_string(), total, "greedy pick");
        }
    }

    // Improve by single additions until none gets closer to the target
    loop {
        let mut best: Option<(usize, f64)> = None;
        let mut best_diff = (target - total).abs();

        for (idx, candidate) in candidates.iter().enumerate() {
            if used[idx] {
                continue;
            }
            let new_total = total + candidate.calories;
            if new_total > max_calories {
                continue;
            }
            let diff = (target - new_total).abs();
            if diff < best_diff {
                best = Some((idx, candidate.calories));
                best_diff = diff;
            }
        }

        let Some((idx, calories)) = best else {
            break;
        };
        total += calories;
        used[idx] = true;
        order.push(idx);
    }

    debug!(
        target_calories = target,
        max_calories,
        total,
        picked = order.len(),
        candidates = candidates.len(),
        "built calorie plan"
    );

    if order.is_empty() {
        return None;
    }
    Some(order.into_iter().map(|idx| candidates[idx].item.clone()).collect())
}

/// Totals for a set of plan items. Missing macros count as zero.
pub fn summarize_plan(items: Vec<MenuItem>, target: Option<f64>) -> Plan {
    let sum = |which: Macro| -> f64 {
        items
            .iter()
            .map(|item| item.macro_value(which).unwrap_or(0.0))
            .sum()
    };
    let total_calories = sum(Macro::Calories);
    let total_protein = sum(Macro::Protein);
    let total_carbs = sum(Macro::Carbs);
    let total_fat = sum(Macro::Fat);
    let target = target.filter(|t| t.is_finite());

    Plan {
        target_calories: target,
        total_calories,
        total_protein,
        total_carbs,
        total_fat,
        diff_calories: target.map(|t| total_calories - t),
        protein_per_cal: protein_per_cal(Some(total_protein), Some(total_calories)),
        items,
    }
}

/// Build and summarize a plan in one step.
pub fn plan_for(items: &[MenuItem], target: Option<f64>) -> Option<Plan> {
    build_calorie_plan(items, target, PlanOptions::default())
        .map(|picked| summarize_plan(picked, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::metrics::with_derived_metrics;

    fn dish(name: &str, calories: f64, protein: f64) -> MenuItem {
        MenuItem {
            calories: Some(calories),
            protein: Some(protein),
            ..MenuItem::new(name, "Grill")
        }
    }

    fn total(items: &[MenuItem]) -> f64 {
        items.iter().filter_map(|i| i.calories).sum()
    }

    #[test]
    fn test_no_target_no_plan() {
        let items = vec![dish("a", 100.0, 10.0)];
        assert!(build_calorie_plan(&items, None, PlanOptions::default()).is_none());
        assert!(build_calorie_plan(&items, Some(0.0), PlanOptions::default()).is_none());
        assert!(build_calorie_plan(&items, Some(f64::NAN), PlanOptions::default()).is_none());
    }

    #[test]
    fn test_nothing_fits_is_none() {
        let items = vec![dish("feast", 2000.0, 80.0)];
        assert!(build_calorie_plan(&items, Some(500.0), PlanOptions::default()).is_none());
    }

    #[test]
    fn test_items_without_calories_are_ignored() {
        let mut mystery = MenuItem::new("mystery", "Grill");
        mystery.protein = Some(90.0);
        let items = vec![mystery, dish("rice", 200.0, 4.0)];

        let plan = build_calorie_plan(&items, Some(250.0), PlanOptions::default()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].name, "rice");
    }

    #[test]
    fn test_greedy_follows_density_then_improves() {
        let items = with_derived_metrics(&[
            dish("lean", 300.0, 45.0),
            dish("mid", 400.0, 20.0),
            dish("snack", 150.0, 3.0),
        ]);
        // target 500, ceiling 560: lean (300) fits, mid would be 700, snack -> 450.
        let plan = build_calorie_plan(&items, Some(500.0), PlanOptions::default()).unwrap();
        let names: Vec<&str> = plan.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["lean", "snack"]);
    }

    #[test]
    fn test_zero_tolerance_caps_at_target() {
        // Greedy takes a (600) and must skip b (500) with no slack above 1000.
        let items = with_derived_metrics(&[dish("a", 600.0, 60.0), dish("b", 500.0, 10.0)]);
        let options = PlanOptions { tolerance: Some(0.0) };

        let plan = build_calorie_plan(&items, Some(1000.0), options).unwrap();
        assert_eq!(total(&plan), 600.0);
    }

    #[test]
    fn test_summarize_plan() {
        let mut soup = dish("soup", 150.0, 6.0);
        soup.carbs = Some(20.0);
        let plan = summarize_plan(vec![dish("steak", 450.0, 42.0), soup], Some(700.0));

        assert_eq!(plan.total_calories, 600.0);
        assert_eq!(plan.total_protein, 48.0);
        assert_eq!(plan.total_carbs, 20.0);
        assert_eq!(plan.total_fat, 0.0);
        assert_eq!(plan.diff_calories, Some(-100.0));
        assert_eq!(plan.protein_per_cal, Some(48.0 / 600.0));
    }

    #[test]
    fn test_summarize_without_target() {
        let plan = summarize_plan(Vec::new(), None);
        assert_eq!(plan.target_calories, None);
        assert_eq!(plan.diff_calories, None);
        assert_eq!(plan.protein_per_cal, None);
    }
}
