use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;
use serde::Serialize;
use strsim::jaro_winkler;
use tracing::warn;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// A dining location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hall {
    pub id: &'static str,
    pub name: &'static str,
    pub slug: &'static str,
}

/// A meal option exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meal {
    pub id: &'static str,
    pub label: &'static str,
}

pub const HALLS: &[Hall] = &[
    Hall {
        id: "busch",
        name: "Busch",
        slug: "busch-dining-hall",
    },
    Hall {
        id: "neilson",
        name: "Neilson",
        slug: "neilson-dining-hall",
    },
    Hall {
        id: "livingston",
        name: "Livingston",
        slug: "livingston-dining-commons",
    },
];

pub const MEAL_OPTIONS: &[Meal] = &[
    Meal {
        id: "breakfast",
        label: "Breakfast",
    },
    Meal {
        id: "lunch",
        label: "Lunch",
    },
    Meal {
        id: "dinner",
        label: "Dinner",
    },
    Meal {
        id: "knight-room-takeout",
        label: "Knight Room Takeout",
    },
];

/// Meals covered by a day plan, in serving order.
pub const DAY_MEALS: &[Meal] = &[
    Meal {
        id: "breakfast",
        label: "Breakfast",
    },
    Meal {
        id: "lunch",
        label: "Lunch",
    },
    Meal {
        id: "dinner",
        label: "Dinner",
    },
];

pub const DEFAULT_MEAL: &str = "lunch";

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const SUGGESTION_THRESHOLD: f64 = 0.7;

pub fn hall_by_id(id: &str) -> Option<&'static Hall> {
    HALLS.iter().find(|hall| hall.id == id)
}

/// Closest known hall id to a mistyped one.
pub fn suggest_hall(id: &str) -> Option<&'static str> {
    let needle = id.to_lowercase();
    HALLS
        .iter()
        .map(|hall| (hall.id, jaro_winkler(hall.id, &needle)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(hall_id, _)| hall_id)
}

/// Resolve requested hall ids. Unknown ids are dropped; no ids means every hall.
pub fn resolve_halls<S: AsRef<str>>(ids: &[S]) -> Vec<&'static Hall> {
    let requested: Vec<&str> = ids
        .iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .collect();

    if requested.is_empty() {
        return HALLS.iter().collect();
    }

    requested
        .into_iter()
        .filter_map(|id| {
            let hall = hall_by_id(id);
            if hall.is_none() {
                match suggest_hall(id) {
                    Some(guess) => warn!(hall = id, suggestion = guess, "unknown hall, did you mean '{guess}'?"),
                    None => warn!(hall = id, "unknown hall, skipping"),
                }
            }
            hall
        })
        .collect()
}

/// Upstream menu-type slug for a meal id. Unknown ids pass through unchanged.
pub fn meal_slug(meal: Option<&str>) -> String {
    let meal = meal.filter(|m| !m.is_empty()).unwrap_or(DEFAULT_MEAL);
    let slug = match meal {
        "breakfast" => "breakfast",
        "lunch" | "lunch-test" => "lunch-test",
        "dinner" => "dinner",
        "takeout" | "knight-room-takeout" => "knight-room-takeout",
        other => other,
    };
    slug.to_string()
}

/// Keep a `YYYY-MM-DD` date as is; anything else becomes today's local date.
pub fn normalize_date(date: Option<&str>) -> String {
    match date {
        Some(d) if ISO_DATE.is_match(d) => d.to_string(),
        _ => Local::now().format("%Y-%m-%d").to_string(),
    }
}

/// Split a normalized date into `(year, month, day)` path segments.
pub fn date_parts(date: &str) -> (&str, &str, &str) {
    let mut parts = date.splitn(3, '-');
    let year = parts.next().unwrap_or_default();
    let month = parts.next().unwrap_or_default();
    let day = parts.next().unwrap_or_default();
    (year, month, day)
}
