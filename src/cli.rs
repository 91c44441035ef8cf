use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::menu::parse_number_str;
use crate::models::{NutritionGoals, ScoringMode};
use crate::source::{DEFAULT_CACHE_TTL_SECS, DEFAULT_TIMEOUT_SECS};

/// Dining planner: rank dining hall menus against macro goals and build calorie plans.
#[derive(Parser, Debug)]
#[command(name = "dining_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Root of the upstream menu API (falls back to $NUTRISLICE_API_BASE).
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Read saved menu documents from this directory instead of the API.
    ///
    /// Layout: <DIR>/<hall-slug>/<meal-slug>.json
    #[arg(long, global = true)]
    pub source_dir: Option<PathBuf>,

    /// Seconds a fetched document stays cached.
    #[arg(long, global = true, default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    /// Upstream request timeout in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List known dining halls and meal options.
    Halls,

    /// Show the normalized menu for one hall.
    Menu {
        /// Hall id.
        #[arg(long, default_value = "busch")]
        hall: String,

        /// Meal id (breakfast, lunch, dinner, takeout).
        #[arg(long, default_value = "lunch")]
        meal: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Include normalizer diagnostics.
        #[arg(long)]
        debug: bool,
    },

    /// Rank one meal's items at each hall against goals and build a plan.
    Recommend {
        /// Meal id (breakfast, lunch, dinner, takeout).
        #[arg(long, default_value = "lunch")]
        meal: String,

        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Include normalizer diagnostics per hall.
        #[arg(long)]
        debug: bool,
    },

    /// Plan breakfast, lunch and dinner across halls with goals split per meal.
    DayPlan {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Hall selection, goals and scoring mode shared by the planning commands.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Comma-separated hall ids (default: all halls).
    #[arg(long, value_delimiter = ',')]
    pub halls: Vec<String>,

    /// Calorie goal (loose numbers like "650kcal" are accepted).
    #[arg(long, value_parser = parse_goal)]
    pub calories: Option<f64>,

    /// Protein goal in grams.
    #[arg(long, value_parser = parse_goal)]
    pub protein: Option<f64>,

    /// Carbohydrate goal in grams.
    #[arg(long, value_parser = parse_goal)]
    pub carbs: Option<f64>,

    /// Fat goal in grams.
    #[arg(long, value_parser = parse_goal)]
    pub fat: Option<f64>,

    /// How items are compared against the goals.
    #[arg(long, value_enum, default_value_t = ScoringMode::Closest)]
    pub mode: ScoringMode,

    /// Prompt for goals and mode not given on the command line.
    #[arg(short, long)]
    pub interactive: bool,
}

impl QueryArgs {
    pub fn goals(&self) -> NutritionGoals {
        NutritionGoals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

/// Date and output format.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Menu date as YYYY-MM-DD (default: today).
    #[arg(long)]
    pub date: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Also write ranked items and plan picks to this CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

fn parse_goal(raw: &str) -> Result<f64, String> {
    parse_number_str(raw).ok_or_else(|| format!("'{raw}' does not contain a number"))
}
