//! Per-hall and per-meal orchestration.
//!
//! Every (hall, meal) unit is fetched and processed on its own; a failing unit
//! becomes an error record next to the successful ones instead of failing the
//! whole request.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::menu::{MenuDiagnostics, normalize_menu};
use crate::models::{MenuItem, NutritionGoals, Plan, ScoringMode};
use crate::planner::{
    DAY_PLAN_DISPLAY_COUNT, RECOMMEND_DISPLAY_COUNT, plan_for, rank_items, with_derived_metrics,
};
use crate::source::catalog::meal_slug;
use crate::source::{Hall, Meal, MenuSource};

/// Inputs for a single-meal recommendation.
#[derive(Debug, Clone)]
pub struct RecommendQuery {
    pub date: String,
    pub halls: Vec<&'static Hall>,
    pub meal: String,
    pub goals: NutritionGoals,
    pub mode: ScoringMode,
    pub debug: bool,
}

/// Inputs for a whole-day plan.
#[derive(Debug, Clone)]
pub struct DayPlanQuery {
    pub date: String,
    pub halls: Vec<&'static Hall>,
    pub meals: Vec<&'static Meal>,
    pub goals: NutritionGoals,
    pub mode: ScoringMode,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEcho {
    pub date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<String>,

    pub halls: Vec<String>,
    pub goals: NutritionGoals,
    pub mode: ScoringMode,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallRecommendation {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub source_url: String,
    pub best_score: Option<f64>,
    pub items: Vec<MenuItem>,
    pub plan: Option<Plan>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<MenuDiagnostics>,
}

/// A unit of work that failed upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchError {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<String>,

    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub query: QueryEcho,
    pub halls: Vec<HallRecommendation>,
    pub errors: Vec<FetchError>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResult {
    pub meal: String,
    pub label: String,
    pub items: Vec<MenuItem>,

    /// Items offered across all halls before ranking and truncation.
    pub item_count: usize,

    pub goals: NutritionGoals,
    pub plan: Option<Plan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayPlanResponse {
    pub query: QueryEcho,
    pub meals: Vec<MealPlanResult>,
    pub errors: Vec<FetchError>,
}

/// Goals count as active when any dimension is set or density ranking is on.
pub fn goals_active(goals: &NutritionGoals, mode: ScoringMode) -> bool {
    goals.any_set() || mode == ScoringMode::ProteinDensity
}

fn hall_ids(halls: &[&Hall]) -> Vec<String> {
    halls.iter().map(|hall| hall.id.to_string()).collect()
}

fn recommend_hall<S: MenuSource + ?Sized>(
    source: &S,
    hall: &Hall,
    query: &RecommendQuery,
    slug: &str,
    active: bool,
) -> Result<HallRecommendation> {
    let document = source.fetch(hall.slug, slug, &query.date)?;
    let normalized = normalize_menu(&document, &query.date);
    let derived = with_derived_metrics(&normalized.items);
    let ranked = rank_items(&derived, &query.goals, query.mode, active);

    let items: Vec<MenuItem> = ranked.iter().take(RECOMMEND_DISPLAY_COUNT).cloned().collect();
    let best_score = if active && query.mode != ScoringMode::ProteinDensity {
        items.first().and_then(|item| item.score)
    } else {
        None
    };
    let plan = plan_for(&ranked, query.goals.calories);

    Ok(HallRecommendation {
        id: hall.id.to_string(),
        name: hall.name.to_string(),
        slug: hall.slug.to_string(),
        source_url: source.location(hall.slug, slug, &query.date),
        best_score,
        items,
        plan,
        debug: query.debug.then_some(normalized.diagnostics),
    })
}

/// Rank and plan one meal at each requested hall.
pub fn recommend<S: MenuSource + ?Sized>(source: &S, query: &RecommendQuery) -> RecommendationResponse {
    let slug = meal_slug(Some(&query.meal));
    let active = goals_active(&query.goals, query.mode);
    info!(date = %query.date, meal = %slug, mode = %query.mode, halls = query.halls.len(), "building recommendations");

    let mut halls = Vec::new();
    let mut errors = Vec::new();

    for hall in &query.halls {
        match recommend_hall(source, hall, query, &slug, active) {
            Ok(result) => halls.push(result),
            Err(e) => {
                warn!(hall = hall.id, error = %e, "hall failed");
                errors.push(FetchError {
                    id: hall.id.to_string(),
                    name: hall.name.to_string(),
                    meal: None,
                    message: e.to_string(),
                });
            }
        }
    }

    RecommendationResponse {
        query: QueryEcho {
            date: query.date.clone(),
            meal: Some(slug),
            halls: hall_ids(&query.halls),
            goals: query.goals,
            mode: query.mode,
        },
        halls,
        errors,
    }
}

/// Items for one meal pooled across halls, each tagged with its hall.
fn pool_meal<S: MenuSource + ?Sized>(
    source: &S,
    halls: &[&'static Hall],
    meal: &Meal,
    date: &str,
    errors: &mut Vec<FetchError>,
) -> Vec<MenuItem> {
    let slug = meal_slug(Some(meal.id));
    let mut combined = Vec::new();

    for hall in halls {
        match source.fetch(hall.slug, &slug, date) {
            Ok(document) => {
                let normalized = normalize_menu(&document, date);
                combined.extend(
                    normalized
                        .items
                        .iter()
                        .map(|item| item.with_hall(hall.id, hall.name, hall.slug)),
                );
            }
            Err(e) => {
                warn!(hall = hall.id, meal = meal.id, error = %e, "hall failed");
                errors.push(FetchError {
                    id: hall.id.to_string(),
                    name: hall.name.to_string(),
                    meal: Some(meal.id.to_string()),
                    message: e.to_string(),
                });
            }
        }
    }
    combined
}

/// Plan breakfast, lunch and dinner with the goals split evenly across them.
pub fn day_plan<S: MenuSource + ?Sized>(source: &S, query: &DayPlanQuery) -> DayPlanResponse {
    let active = goals_active(&query.goals, query.mode);
    let per_meal = query.goals.split(query.meals.len());
    info!(date = %query.date, mode = %query.mode, halls = query.halls.len(), "building day plan");

    let mut meals = Vec::new();
    let mut errors = Vec::new();

    for meal in &query.meals {
        let combined = pool_meal(source, &query.halls, meal, &query.date, &mut errors);
        let derived = with_derived_metrics(&combined);
        let ranked = rank_items(&derived, &per_meal, query.mode, active);
        let plan = plan_for(&ranked, per_meal.calories);

        meals.push(MealPlanResult {
            meal: meal.id.to_string(),
            label: meal.label.to_string(),
            items: ranked.iter().take(DAY_PLAN_DISPLAY_COUNT).cloned().collect(),
            item_count: combined.len(),
            goals: per_meal,
            plan,
        });
    }

    DayPlanResponse {
        query: QueryEcho {
            date: query.date.clone(),
            meal: None,
            halls: hall_ids(&query.halls),
            goals: query.goals,
            mode: query.mode,
        },
        meals,
        errors,
    }
}
