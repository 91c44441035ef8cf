pub mod normalize;
pub mod nutrition;

pub use normalize::{MenuDiagnostics, NormalizedMenu, clean_text, normalize_menu};
pub use nutrition::{ExtractedNutrition, extract_nutrition, parse_number, parse_number_str};
