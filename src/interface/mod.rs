pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_day_plan_csv, write_items_csv, write_recommendations_csv};
pub use prompts::{collect_goals, prompt_goal, prompt_mode, prompt_yes_no};
pub use render::{
    display_catalog, display_day_plan, display_diagnostics, display_items, display_plan,
    display_recommendations,
};
