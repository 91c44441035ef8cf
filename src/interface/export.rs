use std::path::Path;

use crate::aggregate::{DayPlanResponse, RecommendationResponse};
use crate::error::Result;
use crate::models::MenuItem;

const HEADER: [&str; 12] = [
    "group",
    "section",
    "rank",
    "name",
    "station",
    "hall",
    "calories",
    "protein",
    "carbs",
    "fat",
    "protein_per_cal",
    "score",
];

fn cell(value: Option<f64>, decimals: usize) -> String {
    value.map(|v| format!("{:.*}", decimals, v)).unwrap_or_default()
}

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    group: &str,
    section: &str,
    items: &[MenuItem],
) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        wtr.write_record([
            group.to_string(),
            section.to_string(),
            (i + 1).to_string(),
            item.name.clone(),
            item.station.clone(),
            item.hall_id.clone().unwrap_or_default(),
            cell(item.calories, 0),
            cell(item.protein, 1),
            cell(item.carbs, 1),
            cell(item.fat, 1),
            cell(item.protein_per_cal, 4),
            cell(item.score, 4),
        ])?;
    }
    Ok(())
}

/// Write a single list of items to a CSV file.
pub fn write_items_csv(items: &[MenuItem], group: &str, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;
    write_rows(&mut wtr, group, "menu", items)?;
    wtr.flush()?;
    Ok(())
}

/// Write displayed items and plan picks for every hall to a CSV file.
pub fn write_recommendations_csv(response: &RecommendationResponse, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;

    for hall in &response.halls {
        write_rows(&mut wtr, hall.id.as_str(), "ranked", &hall.items)?;
        if let Some(plan) = &hall.plan {
            write_rows(&mut wtr, hall.id.as_str(), "plan", &plan.items)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write displayed items and plan picks for every meal to a CSV file.
pub fn write_day_plan_csv(response: &DayPlanResponse, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;

    for meal in &response.meals {
        write_rows(&mut wtr, meal.meal.as_str(), "ranked", &meal.items)?;
        if let Some(plan) = &meal.plan {
            write_rows(&mut wtr, meal.meal.as_str(), "plan", &plan.items)?;
        }
    }

    wtr.flush()?;
    Ok(())
}
