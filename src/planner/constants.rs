// ─────────────────────────────────────────────────────────────────────────────
// Plan builder
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest calorie slack allowed above the plan target.
pub const MIN_TOLERANCE_CALORIES: f64 = 60.0;

/// Slack above the target as a fraction of the target.
pub const TOLERANCE_FRACTION: f64 = 0.08;

/// Default slack for a target: `max(60, round(0.08 * target))`.
pub fn default_tolerance(target: f64) -> f64 {
    MIN_TOLERANCE_CALORIES.max((target * TOLERANCE_FRACTION).round())
}

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

/// Items shown per hall for a single-meal recommendation.
pub const RECOMMEND_DISPLAY_COUNT: usize = 6;

/// Items shown per meal in a day plan.
pub const DAY_PLAN_DISPLAY_COUNT: usize = 8;

/// Station label for food listed before any section header.
pub const FALLBACK_STATION: &str = "Station";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tolerance() {
        assert_eq!(default_tolerance(500.0), 60.0);
        assert_eq!(default_tolerance(800.0), 64.0);
        assert_eq!(default_tolerance(2000.0), 160.0);
        // 0.08 * 1006.25 = 80.5 rounds up
        assert_eq!(default_tolerance(1006.25), 81.0);
    }
}
