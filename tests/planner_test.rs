use assert_float_eq::assert_float_absolute_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dining_planner_rs::models::{MenuItem, NutritionGoals, ScoringMode};
use dining_planner_rs::planner::{
    PlanOptions, build_calorie_plan, default_tolerance, plan_for, rank_by_score, score_item,
    sort_by_protein_density, with_derived_metrics,
};

fn make_item(name: &str, calories: Option<f64>, protein: Option<f64>) -> MenuItem {
    MenuItem {
        calories,
        protein,
        ..MenuItem::new(name, "Grill")
    }
}

fn total_calories(items: &[MenuItem]) -> f64 {
    items.iter().filter_map(|i| i.calories).sum()
}

/// The greedy fill alone, for comparison against the full builder.
fn greedy_only_total(items: &[MenuItem], target: f64) -> f64 {
    let ceiling = target + default_tolerance(target);
    let mut total = 0.0;
    for item in sort_by_protein_density(items) {
        let cal = item.calories.unwrap_or(0.0);
        if cal > 0.0 && total + cal <= ceiling {
            total += cal;
        }
    }
    total
}

#[test]
fn test_protein_per_cal_property() {
    let items = with_derived_metrics(&[
        make_item("a", Some(250.0), Some(30.0)),
        make_item("b", Some(0.0), Some(5.0)),
        make_item("c", None, Some(5.0)),
        make_item("d", Some(120.0), None),
    ]);

    assert_float_absolute_eq!(items[0].protein_per_cal.unwrap(), 30.0 / 250.0, 1e-12);
    assert!(items[1].protein_per_cal.is_none());
    assert!(items[2].protein_per_cal.is_none());
    assert!(items[3].protein_per_cal.is_none());
}

#[test]
fn test_density_ranking_tie_break_and_idempotence() {
    let items = with_derived_metrics(&[
        make_item("A", Some(200.0), Some(20.0)),
        make_item("B", Some(150.0), Some(15.0)),
    ]);
    // Force an exact tie on density and protein.
    let mut tied = items.clone();
    tied[1].protein = Some(20.0);
    tied[0].protein_per_cal = Some(0.1);
    tied[1].protein_per_cal = Some(0.1);

    let once = sort_by_protein_density(&tied);
    assert_eq!(once[0].name, "B", "fewer calories should win an exact tie");
    assert_eq!(sort_by_protein_density(&once), once);
}

#[test]
fn test_under_mode_scenario() {
    let goals = NutritionGoals {
        protein: Some(30.0),
        ..Default::default()
    };
    let items = vec![
        make_item("p20", None, Some(20.0)),
        make_item("p40", None, Some(40.0)),
        make_item("pnull", None, None),
    ];

    let ranked = rank_by_score(&items, &goals, ScoringMode::Under);

    assert_eq!(ranked.len(), 2, "null-protein item should be excluded");
    assert_eq!(ranked[0].name, "p20");
    assert_eq!(ranked[0].score, Some(0.0));
    assert_eq!(ranked[1].name, "p40");
    assert_float_absolute_eq!(ranked[1].score.unwrap(), 10.0 / 30.0, 1e-12);
}

#[test]
fn test_empty_goals_score_nothing() {
    let goals = NutritionGoals::default();
    let item = make_item("any", Some(500.0), Some(25.0));

    for mode in [ScoringMode::Closest, ScoringMode::Under, ScoringMode::Over] {
        assert!(score_item(&item, &goals, mode).is_none(), "mode {mode} scored");
    }
}

#[test]
fn test_plan_target_800_example() {
    let items = with_derived_metrics(&[
        make_item("one", Some(200.0), Some(30.0)),
        make_item("two", Some(300.0), Some(10.0)),
        make_item("three", Some(250.0), Some(40.0)),
        make_item("four", Some(100.0), Some(5.0)),
    ]);

    let plan = plan_for(&items, Some(800.0)).expect("some candidate fits");

    assert!(plan.total_calories <= 864.0, "ceiling broken: {}", plan.total_calories);
    let greedy = greedy_only_total(&items, 800.0);
    assert!((800.0 - plan.total_calories).abs() <= (800.0 - greedy).abs());
    // three (0.16), one (0.15), four (0.05) -> 550, then two -> 850.
    let names: Vec<&str> = plan.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["three", "one", "four", "two"]);
    assert_eq!(plan.target_calories, Some(800.0));
    assert_eq!(plan.diff_calories, Some(50.0));
    assert_eq!(plan.total_protein, 85.0);
}

#[test]
fn test_plan_never_exceeds_ceiling_random() {
    let mut rng = StdRng::seed_from_u64(123);

    for round in 0..200 {
        let count = rng.gen_range(1..25);
        let items: Vec<MenuItem> = (0..count)
            .map(|i| {
                let calories = if rng.gen_bool(0.1) {
                    None
                } else {
                    Some(rng.gen_range(0.0..900.0_f64).round())
                };
                let protein = if rng.gen_bool(0.1) {
                    None
                } else {
                    Some(rng.gen_range(0.0..60.0_f64).round())
                };
                make_item(&format!("item-{i}"), calories, protein)
            })
            .collect();
        let items = with_derived_metrics(&items);
        let target = rng.gen_range(100.0..2500.0_f64).round();

        let Some(plan) = build_calorie_plan(&items, Some(target), PlanOptions::default()) else {
            continue;
        };

        let ceiling = target + default_tolerance(target);
        assert!(
            total_calories(&plan) <= ceiling,
            "round {round}: {} > {ceiling}",
            total_calories(&plan)
        );

        let mut names: Vec<&str> = plan.iter().map(|i| i.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), plan.len(), "round {round}: duplicate pick");
    }
}

#[test]
fn test_plan_ignores_scoring_mode_order() {
    let goals = NutritionGoals {
        calories: Some(600.0),
        ..Default::default()
    };
    let items = with_derived_metrics(&[
        make_item("close-but-lean-protein", Some(590.0), Some(5.0)),
        make_item("dense", Some(300.0), Some(45.0)),
        make_item("dense-too", Some(320.0), Some(40.0)),
    ]);

    let ranked = rank_by_score(&items, &goals, ScoringMode::Closest);
    assert_eq!(ranked[0].name, "close-but-lean-protein");

    let plan = plan_for(&ranked, goals.calories).unwrap();
    let names: Vec<&str> = plan.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["dense", "dense-too"]);
}
