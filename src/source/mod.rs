//! Where raw menu documents come from.
//!
//! The aggregator only sees the [`MenuSource`] trait. Two implementations ship
//! with the crate: [`HttpMenuSource`] talks to the upstream menu API and keeps a
//! short-lived cache, [`DirMenuSource`] reads saved documents from disk.

pub mod catalog;
mod dir;
mod http;

pub use catalog::{DAY_MEALS, HALLS, Hall, MEAL_OPTIONS, Meal};
pub use dir::DirMenuSource;
pub use http::{HttpMenuSource, HttpSourceConfig};

use crate::error::Result;
use crate::models::RawDocument;

/// Default upstream menu API root.
pub const DEFAULT_API_BASE: &str = "https://rutgers.api.nutrislice.com/menu/api/weeks/school";

/// How long fetched documents stay cached.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 10 * 60;

/// Upstream request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Environment variable that overrides [`DEFAULT_API_BASE`].
pub const API_BASE_ENV: &str = "NUTRISLICE_API_BASE";

pub const USER_AGENT: &str = "DiningHallScanner/0.2 (+local dev)";

/// Supplies the raw weekly document for one hall and meal.
pub trait MenuSource {
    /// Fetch the document covering `date` (`YYYY-MM-DD`).
    fn fetch(&self, hall_slug: &str, meal_slug: &str, date: &str) -> Result<RawDocument>;

    /// Human-readable location of the document (URL or path).
    fn location(&self, hall_slug: &str, meal_slug: &str, date: &str) -> String;
}

impl<S: MenuSource + ?Sized> MenuSource for &S {
    fn fetch(&self, hall_slug: &str, meal_slug: &str, date: &str) -> Result<RawDocument> {
        (**self).fetch(hall_slug, meal_slug, date)
    }

    fn location(&self, hall_slug: &str, meal_slug: &str, date: &str) -> String {
        (**self).location(hall_slug, meal_slug, date)
    }
}

impl<S: MenuSource + ?Sized> MenuSource for Box<S> {
    fn fetch(&self, hall_slug: &str, meal_slug: &str, date: &str) -> Result<RawDocument> {
        (**self).fetch(hall_slug, meal_slug, date)
    }

    fn location(&self, hall_slug: &str, meal_slug: &str, date: &str) -> String {
        (**self).location(hall_slug, meal_slug, date)
    }
}
