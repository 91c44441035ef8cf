use crate::aggregate::{DayPlanResponse, FetchError, MealPlanResult, RecommendationResponse};
use crate::menu::MenuDiagnostics;
use crate::models::{MenuItem, Plan};
use crate::source::{HALLS, MEAL_OPTIONS};

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Widest value in characters, for `{:<w$}` padding.
fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> Option<usize> {
    values.map(|v| v.chars().count()).max()
}

/// Print a numbered table of menu items.
pub fn display_items(items: &[MenuItem]) {
    if items.is_empty() {
        println!("  (no items)");
        return;
    }

    let name_width = column_width(items.iter().map(|i| i.name.as_str())).unwrap_or(10);
    let station_width = column_width(items.iter().map(|i| i.station.as_str())).unwrap_or(7);

    for (i, item) in items.iter().enumerate() {
        let hall = item
            .hall_name
            .as_deref()
            .map(|h| format!(" @ {h}"))
            .unwrap_or_default();
        let score = item
            .score
            .map(|s| format!("  score {s:.3}"))
            .unwrap_or_default();

        println!(
            "{:>3}. {:<nw$}  {:<sw$}  {:>5} cal | P {:>5} C {:>5} F {:>5} | P/cal {:>6}{}{}",
            i + 1,
            item.name,
            item.station,
            fmt_opt(item.calories, 0),
            fmt_opt(item.protein, 1),
            fmt_opt(item.carbs, 1),
            fmt_opt(item.fat, 1),
            fmt_opt(item.protein_per_cal, 3),
            score,
            hall,
            nw = name_width,
            sw = station_width
        );
    }
}

/// Print a plan with its totals.
pub fn display_plan(plan: Option<&Plan>) {
    let Some(plan) = plan else {
        println!("No plan (no calorie target, or nothing fits under it).");
        return;
    };

    println!("--- Plan ---");
    for (i, item) in plan.items.iter().enumerate() {
        println!(
            "{:>3}. {} - {} cal, {} g protein",
            i + 1,
            item.name,
            fmt_opt(item.calories, 0),
            fmt_opt(item.protein, 1)
        );
    }
    println!(
        "Total: {:.0} cal (target {}, diff {}) | P {:.1} C {:.1} F {:.1} | P/cal {}",
        plan.total_calories,
        fmt_opt(plan.target_calories, 0),
        fmt_opt(plan.diff_calories, 0),
        plan.total_protein,
        plan.total_carbs,
        plan.total_fat,
        fmt_opt(plan.protein_per_cal, 3)
    );
}

fn display_errors(errors: &[FetchError]) {
    if errors.is_empty() {
        return;
    }
    println!();
    println!("=== Errors ===");
    for error in errors {
        match &error.meal {
            Some(meal) => println!("  {} ({}): {}", error.name, meal, error.message),
            None => println!("  {}: {}", error.name, error.message),
        }
    }
}

pub fn display_diagnostics(diagnostics: &MenuDiagnostics) {
    println!(
        "  [debug] date {} found={} available={:?} items={:?} headers={:?} parsed={:?}",
        diagnostics.target_date,
        diagnostics.target_found,
        diagnostics.available_dates,
        diagnostics.menu_item_count,
        diagnostics.station_header_count,
        diagnostics.parsed_item_count
    );
}

pub fn display_recommendations(response: &RecommendationResponse) {
    println!();
    println!(
        "=== Recommendations for {} ({}, mode {}) ===",
        response.query.date,
        response.query.meal.as_deref().unwrap_or_default(),
        response.query.mode
    );

    for hall in &response.halls {
        println!();
        let best = hall
            .best_score
            .map(|s| format!(" - best score {s:.3}"))
            .unwrap_or_default();
        println!("## {}{}", hall.name, best);
        if let Some(diagnostics) = &hall.debug {
            display_diagnostics(diagnostics);
        }
        display_items(&hall.items);
        display_plan(hall.plan.as_ref());
    }

    display_errors(&response.errors);
    println!();
}

fn display_meal(meal: &MealPlanResult) {
    println!();
    println!(
        "## {} ({} items offered, target {} cal)",
        meal.label,
        meal.item_count,
        fmt_opt(meal.goals.calories, 0)
    );
    display_items(&meal.items);
    display_plan(meal.plan.as_ref());
}

pub fn display_day_plan(response: &DayPlanResponse) {
    println!();
    println!(
        "=== Day plan for {} (mode {}) ===",
        response.query.date, response.query.mode
    );
    for meal in &response.meals {
        display_meal(meal);
    }
    display_errors(&response.errors);
    println!();
}

/// List the known halls and meal options.
pub fn display_catalog() {
    println!("Halls:");
    for hall in HALLS {
        println!("  {:<12} {:<12} {}", hall.id, hall.name, hall.slug);
    }
    println!();
    println!("Meals:");
    for meal in MEAL_OPTIONS {
        println!("  {:<20} {}", meal.id, meal.label);
    }
}
