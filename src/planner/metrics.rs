use crate::models::MenuItem;

/// Protein grams per calorie.
///
/// `None` unless both values are finite and calories are positive.
#[inline]
pub fn protein_per_cal(protein: Option<f64>, calories: Option<f64>) -> Option<f64> {
    match (protein, calories) {
        (Some(p), Some(c)) if p.is_finite() && c.is_finite() && c > 0.0 => Some(p / c),
        _ => None,
    }
}

/// Copy of `items` with `protein_per_cal` filled in.
pub fn with_derived_metrics(items: &[MenuItem]) -> Vec<MenuItem> {
    items
        .iter()
        .map(|item| MenuItem {
            protein_per_cal: protein_per_cal(item.protein, item.calories),
            ..item.clone()
        })
        .collect()
}
