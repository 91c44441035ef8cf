use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::tempdir;

use dining_planner_rs::aggregate::{RecommendQuery, recommend};
use dining_planner_rs::interface::{write_items_csv, write_recommendations_csv};
use dining_planner_rs::menu::normalize_menu;
use dining_planner_rs::models::{NutritionGoals, ScoringMode};
use dining_planner_rs::planner::with_derived_metrics;
use dining_planner_rs::source::catalog::resolve_halls;
use dining_planner_rs::source::{DirMenuSource, MenuSource};

fn write_menu(root: &Path, hall_slug: &str, meal_slug: &str) {
    let hall_dir = root.join(hall_slug);
    fs::create_dir_all(&hall_dir).unwrap();
    let document = json!({
        "days": [{
            "date": "2024-09-03",
            "menu_info": {"5": {"section_options": {"display_name": "Grill"}}},
            "menu_items": [
                {"is_station_header": true, "text": "", "menu_id": 5},
                {"food": {"name": "Chicken Breast", "rounded_nutrition_info": {"calories": 220, "g_protein": "38g", "g_fat": 5}}},
                {"food": {"name": "Fries", "rounded_nutrition_info": {"calories": 410, "g_protein": 4, "g_carbs": 52}}},
                {"food": {"name": "Ketchup", "rounded_nutrition_info": {"calories": 0}}}
            ]
        }]
    });
    fs::write(
        hall_dir.join(format!("{meal_slug}.json")),
        serde_json::to_string(&document).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_dir_source_feeds_normalizer() {
    let dir = tempdir().unwrap();
    write_menu(dir.path(), "livingston-dining-commons", "dinner");
    let source = DirMenuSource::new(dir.path());

    let document = source
        .fetch("livingston-dining-commons", "dinner", "2024-09-03")
        .unwrap();
    let items = with_derived_metrics(&normalize_menu(&document, "2024-09-03").items);

    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.station == "Grill"));
    assert_eq!(items[0].protein, Some(38.0));
    assert_eq!(items[2].protein_per_cal, None);

    let csv_path = dir.path().join("menu.csv");
    write_items_csv(&items, "livingston", &csv_path).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][3], "Chicken Breast");
    assert_eq!(&rows[0][8], "");
}

#[test]
fn test_recommendations_round_trip_through_csv() {
    let dir = tempdir().unwrap();
    write_menu(dir.path(), "busch-dining-hall", "lunch-test");
    let source = DirMenuSource::new(dir.path());

    let query = RecommendQuery {
        date: "2024-09-03".to_string(),
        halls: resolve_halls(&["busch", "neilson"]),
        meal: "lunch".to_string(),
        goals: NutritionGoals {
            calories: Some(600.0),
            protein: Some(40.0),
            ..Default::default()
        },
        mode: ScoringMode::Closest,
        debug: false,
    };

    let response = recommend(&source, &query);
    assert_eq!(response.halls.len(), 1);
    assert_eq!(response.errors.len(), 1, "neilson has no saved document");

    let hall = &response.halls[0];
    // Ketchup has calories but no protein, so only its calories are scored.
    assert_eq!(hall.items.len(), 3);
    let plan = hall.plan.as_ref().unwrap();
    assert_eq!(plan.total_calories, 630.0);

    let csv_path = dir.path().join("out.csv");
    write_recommendations_csv(&response, &csv_path).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "group");
    assert_eq!(&headers[11], "score");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    let ranked = rows.iter().filter(|r| &r[1] == "ranked").count();
    let planned = rows.iter().filter(|r| &r[1] == "plan").count();
    assert_eq!(ranked, hall.items.len());
    assert_eq!(planned, plan.items.len());
    assert!(rows.iter().all(|r| &r[0] == "busch"));
}
