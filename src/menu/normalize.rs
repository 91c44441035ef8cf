use std::collections::HashMap;

use serde::Serialize;

use crate::menu::nutrition::extract_nutrition;
use crate::models::raw::RawMenuInfo;
use crate::models::{MenuItem, RawDay, RawDocument, RawMenuEntry};
use crate::planner::constants::FALLBACK_STATION;

/// Bookkeeping about one normalization run. Not consumed by ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDiagnostics {
    pub target_date: String,
    pub target_found: bool,
    pub available_dates: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_info_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_header_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_item_count: Option<usize>,
}

/// Flat, source-ordered items for one day plus diagnostics.
#[derive(Debug, Clone)]
pub struct NormalizedMenu {
    pub items: Vec<MenuItem>,
    pub diagnostics: MenuDiagnostics,
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn menu_info_name(menu_info: &HashMap<String, RawMenuInfo>, key: Option<&str>) -> String {
    key.and_then(|k| menu_info.get(k))
        .and_then(|info| info.section_options.as_ref())
        .and_then(|options| options.display_name.as_deref())
        .map(clean_text)
        .unwrap_or_default()
}

/// Running state threaded through the walk over a day's entries.
#[derive(Default)]
struct Walk {
    current_station: String,
    headers: usize,
    items: Vec<MenuItem>,
}

impl Walk {
    fn step(mut self, entry: &RawMenuEntry, menu_info: &HashMap<String, RawMenuInfo>) -> Self {
        let key = entry.menu_key();

        if entry.is_header() {
            let text = clean_text(entry.text.as_deref().unwrap_or_default());
            let label = if text.is_empty() {
                menu_info_name(menu_info, key.as_deref())
            } else {
                text
            };
            if !label.is_empty() {
                self.current_station = label;
            }
            self.headers += 1;
            return self;
        }

        let Some(food) = entry.food.as_ref() else {
            return self;
        };
        let Some(name) = food.name.as_deref().filter(|n| !n.is_empty()) else {
            return self;
        };

        let own_station = menu_info_name(menu_info, key.as_deref());
        let station = if !own_station.is_empty() {
            own_station
        } else if !self.current_station.is_empty() {
            self.current_station.clone()
        } else {
            FALLBACK_STATION.to_string()
        };

        let extracted = extract_nutrition(food);
        self.items.push(MenuItem {
            calories: extracted.calories,
            protein: extracted.protein,
            carbs: extracted.carbs,
            fat: extracted.fat,
            nutrition: extracted.nutrition,
            ..MenuItem::new(clean_text(name), station)
        });
        self
    }
}

fn normalize_day(day: &RawDay) -> (Vec<MenuItem>, usize) {
    let walk = day
        .menu_items
        .iter()
        .fold(Walk::default(), |walk, entry| walk.step(entry, &day.menu_info));
    (walk.items, walk.headers)
}

/// Turn a raw weekly document into the items served on `date`.
///
/// A document without a matching day is not an error: the result has no items
/// and `target_found` is false.
pub fn normalize_menu(document: &RawDocument, date: &str) -> NormalizedMenu {
    let available_dates: Vec<String> = document
        .days
        .iter()
        .filter_map(|day| day.date.clone())
        .collect();

    let Some(day) = document
        .days
        .iter()
        .find(|day| day.date.as_deref() == Some(date))
    else {
        return NormalizedMenu {
            items: Vec::new(),
            diagnostics: MenuDiagnostics {
                target_date: date.to_string(),
                target_found: false,
                available_dates,
                menu_item_count: None,
                menu_info_count: None,
                station_header_count: None,
                parsed_item_count: None,
            },
        };
    };

    let (items, headers) = normalize_day(day);

    NormalizedMenu {
        diagnostics: MenuDiagnostics {
            target_date: date.to_string(),
            target_found: true,
            available_dates,
            menu_item_count: Some(day.menu_items.len()),
            menu_info_count: Some(day.menu_info.len()),
            station_header_count: Some(headers),
            parsed_item_count: Some(items.len()),
        },
        items,
    }
}
