pub mod constants;
pub mod metrics;
pub mod plan;
pub mod ranking;
pub mod scoring;

pub use constants::*;
pub use metrics::{protein_per_cal, with_derived_metrics};
pub use plan::{PlanOptions, build_calorie_plan, plan_for, summarize_plan};
pub use ranking::{rank_by_score, rank_items, sort_by_protein_density};
pub use scoring::score_item;
