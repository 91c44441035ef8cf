use std::path::Path;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing::info;

use dining_planner_rs::aggregate::{DayPlanQuery, RecommendQuery, day_plan, recommend};
use dining_planner_rs::cli::{Cli, Command, OutputArgs, QueryArgs};
use dining_planner_rs::error::{MenuError, Result};
use dining_planner_rs::interface::{
    collect_goals, display_catalog, display_day_plan, display_diagnostics, display_items,
    display_recommendations, prompt_mode, prompt_yes_no, write_day_plan_csv, write_items_csv,
    write_recommendations_csv,
};
use dining_planner_rs::logging;
use dining_planner_rs::menu::normalize_menu;
use dining_planner_rs::models::{NutritionGoals, ScoringMode};
use dining_planner_rs::planner::with_derived_metrics;
use dining_planner_rs::source::catalog::{
    hall_by_id, meal_slug, normalize_date, resolve_halls, suggest_hall,
};
use dining_planner_rs::source::{
    DAY_MEALS, DirMenuSource, HttpMenuSource, HttpSourceConfig, MenuSource,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let source = build_source(&cli)?;

    match &cli.command {
        Command::Halls => {
            display_catalog();
            Ok(())
        }
        Command::Menu {
            hall,
            meal,
            output,
            debug,
        } => cmd_menu(source.as_ref(), hall, meal, output, *debug),
        Command::Recommend {
            meal,
            query,
            output,
            debug,
        } => cmd_recommend(source.as_ref(), meal, query, output, *debug),
        Command::DayPlan { query, output } => cmd_day_plan(source.as_ref(), query, output),
    }
}

fn build_source(cli: &Cli) -> Result<Box<dyn MenuSource>> {
    if let Some(dir) = &cli.source_dir {
        info!(dir = %dir.display(), "using saved menu documents");
        return Ok(Box::new(DirMenuSource::new(dir)));
    }

    let config = HttpSourceConfig {
        api_base: HttpSourceConfig::resolve_api_base(cli.api_base.as_deref()),
        cache_ttl: Duration::from_secs(cli.cache_ttl_secs),
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    Ok(Box::new(HttpMenuSource::new(config)?))
}

/// Goals and mode from flags, topped up interactively when asked.
fn resolve_query(query: &QueryArgs) -> Result<(NutritionGoals, ScoringMode)> {
    if !query.interactive {
        return Ok((query.goals(), query.mode));
    }
    let goals = collect_goals(query.goals())?;
    let mode = prompt_mode(query.mode)?;
    Ok((goals, mode))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Whether it is fine to write `path`; asks before overwriting in interactive runs.
fn may_write(path: &Path, interactive: bool) -> Result<bool> {
    if !interactive || !path.exists() {
        return Ok(true);
    }
    prompt_yes_no(&format!("Overwrite {}?", path.display()), false)
}

/// Show the normalized menu for one hall and meal.
fn cmd_menu(
    source: &dyn MenuSource,
    hall_id: &str,
    meal: &str,
    output: &OutputArgs,
    debug: bool,
) -> Result<()> {
    let hall = hall_by_id(hall_id).ok_or_else(|| match suggest_hall(hall_id) {
        Some(guess) => MenuError::UnknownHall(format!("{hall_id} (did you mean '{guess}'?)")),
        None => MenuError::UnknownHall(hall_id.to_string()),
    })?;
    let date = normalize_date(output.date.as_deref());
    let slug = meal_slug(Some(meal));

    let document = source.fetch(hall.slug, &slug, &date)?;
    let normalized = normalize_menu(&document, &date);
    let items = with_derived_metrics(&normalized.items);

    if let Some(path) = &output.csv {
        write_items_csv(&items, hall.id, path)?;
        info!(path = %path.display(), "wrote menu CSV");
    }

    if output.json {
        return print_json(&serde_json::json!({
            "hall": hall.id,
            "date": &date,
            "meal": &slug,
            "url": source.location(hall.slug, &slug, &date),
            "items": items,
            "debug": debug.then_some(&normalized.diagnostics),
        }));
    }

    println!();
    println!("=== {} {} on {} ===", hall.name, slug, date);
    if debug {
        display_diagnostics(&normalized.diagnostics);
    }
    display_items(&items);
    println!();
    Ok(())
}

/// Rank one meal's items at each requested hall.
fn cmd_recommend(
    source: &dyn MenuSource,
    meal: &str,
    args: &QueryArgs,
    output: &OutputArgs,
    debug: bool,
) -> Result<()> {
    let (goals, mode) = resolve_query(args)?;
    let query = RecommendQuery {
        date: normalize_date(output.date.as_deref()),
        halls: resolve_halls(&args.halls),
        meal: meal.to_string(),
        goals,
        mode,
        debug,
    };

    let response = recommend(source, &query);

    if let Some(path) = &output.csv {
        if may_write(path, args.interactive)? {
            write_recommendations_csv(&response, path)?;
            info!(path = %path.display(), "wrote recommendations CSV");
        }
    }

    if output.json {
        print_json(&response)
    } else {
        display_recommendations(&response);
        Ok(())
    }
}

/// Plan a full day across halls.
fn cmd_day_plan(source: &dyn MenuSource, args: &QueryArgs, output: &OutputArgs) -> Result<()> {
    let (goals, mode) = resolve_query(args)?;
    let query = DayPlanQuery {
        date: normalize_date(output.date.as_deref()),
        halls: resolve_halls(&args.halls),
        meals: DAY_MEALS.iter().collect(),
        goals,
        mode,
    };

    let response = day_plan(source, &query);

    if let Some(path) = &output.csv {
        if may_write(path, args.interactive)? {
            write_day_plan_csv(&response, path)?;
            info!(path = %path.display(), "wrote day plan CSV");
        }
    }

    if output.json {
        print_json(&response)
    } else {
        display_day_plan(&response);
        Ok(())
    }
}
