use std::cmp::Ordering;

use crate::models::{Macro, MenuItem, NutritionGoals, ScoringMode};
use crate::planner::scoring::score_item;

/// Density order: ratio desc (missing last), protein desc, calories asc.
fn density_order(a: &MenuItem, b: &MenuItem) -> Ordering {
    let ratio = |item: &MenuItem| item.protein_per_cal.unwrap_or(f64::NEG_INFINITY);
    let protein = |item: &MenuItem| item.macro_value(Macro::Protein).unwrap_or(f64::NEG_INFINITY);
    let calories = |item: &MenuItem| item.macro_value(Macro::Calories).unwrap_or(f64::INFINITY);

    ratio(b)
        .total_cmp(&ratio(a))
        .then_with(|| protein(b).total_cmp(&protein(a)))
        .then_with(|| calories(a).total_cmp(&calories(b)))
}

/// Sort by protein per calorie, best first.
///
/// Expects `protein_per_cal` to be derived already. Ties fall back to more
/// protein, then fewer calories; items with unknown values sink.
pub fn sort_by_protein_density(items: &[MenuItem]) -> Vec<MenuItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(density_order);
    sorted
}

/// Score every item, drop the unscorable ones and sort ascending by score.
///
/// Equal scores keep their input order.
pub fn rank_by_score(items: &[MenuItem], goals: &NutritionGoals, mode: ScoringMode) -> Vec<MenuItem> {
    let mut scored: Vec<MenuItem> = items
        .iter()
        .filter_map(|item| {
            let score = score_item(item, goals, mode)?;
            Some(item.with_score(Some(score)))
        })
        .collect();

    scored.sort_by(|a, b| {
        let a = a.score.unwrap_or(f64::INFINITY);
        let b = b.score.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
    scored
}

/// Apply the display ranking for a request.
///
/// Protein density always sorts; goal modes score only when a goal is active,
/// otherwise items keep their menu order.
pub fn rank_items(
    items: &[MenuItem],
    goals: &NutritionGoals,
    mode: ScoringMode,
    goals_active: bool,
) -> Vec<MenuItem> {
    match mode {
        ScoringMode::ProteinDensity => sort_by_protein_density(items),
        _ if goals_active => rank_by_score(items, goals, mode),
        _ => items.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::metrics::with_derived_metrics;

    fn dish(name: &str, calories: Option<f64>, protein: Option<f64>) -> MenuItem {
        MenuItem {
            calories,
            protein,
            ..MenuItem::new(name, "Grill")
        }
    }

    fn names(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_density_tie_breaks() {
        let items = with_derived_metrics(&[
            dish("A", Some(200.0), Some(20.0)),
            dish("B", Some(150.0), Some(15.0)),
            dish("C", Some(100.0), Some(30.0)),
            dish("D", None, Some(50.0)),
            dish("E", Some(400.0), Some(40.0)),
        ]);

        let sorted = sort_by_protein_density(&items);
        // A, B and E all sit at 0.1; E has the most protein, then A over B.
        assert_eq!(names(&sorted), vec!["C", "E", "A", "B", "D"]);
    }

    #[test]
    fn test_density_equal_protein_prefers_fewer_calories() {
        let mut a = dish("A", Some(200.0), Some(20.0));
        let mut b = dish("B", Some(150.0), Some(20.0));
        a.protein_per_cal = Some(0.1);
        b.protein_per_cal = Some(0.1);

        let sorted = sort_by_protein_density(&[a, b]);
        assert_eq!(names(&sorted), vec!["B", "A"]);
        assert_eq!(sort_by_protein_density(&sorted), sorted);
    }

    #[test]
    fn test_rank_by_score_drops_unscorable_and_is_stable() {
        let goals = NutritionGoals {
            protein: Some(30.0),
            ..Default::default()
        };
        let items = vec![
            dish("first-low", None, Some(20.0)),
            dish("high", None, Some(40.0)),
            dish("unknown", None, None),
            dish("second-low", None, Some(10.0)),
        ];

        let ranked = rank_by_score(&items, &goals, ScoringMode::Under);
        assert_eq!(names(&ranked), vec!["first-low", "second-low", "high"]);
        assert_eq!(ranked[0].score, Some(0.0));
    }

    #[test]
    fn test_rank_items_without_goals_keeps_menu_order() {
        let items = vec![dish("x", Some(500.0), None), dish("y", Some(100.0), None)];
        let ranked = rank_items(&items, &NutritionGoals::default(), ScoringMode::Closest, false);

        assert_eq!(names(&ranked), vec!["x", "y"]);
        assert!(ranked.iter().all(|i| i.score.is_none()));
    }
}
