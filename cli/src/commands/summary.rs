use anyhow::{Result, bail};
use chrono::Local;

use kalori_core::TrackerService;
use kalori_core::models::{DailySummary, Goal};

use super::helpers::{parse_food_amount, print_entry_table, round_kcal};
use super::resolve_food;

pub(crate) fn cmd_plan(
    service: &mut TrackerService,
    height_cm: f64,
    weight_kg: f64,
    goal: &str,
    adds: &[String],
    json: bool,
) -> Result<()> {
    let goal: Goal = goal.parse()?;
    service.set_profile(height_cm, weight_kg, goal)?;

    for add in adds {
        let (query, amount, unit) = parse_food_amount(add)?;
        let Some(food) = resolve_food(service, &query)? else {
            bail!("No food found for '{query}'");
        };
        service.log_food(food.id, amount, unit)?;
    }

    let summary = service.daily_summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

pub(super) fn print_summary(summary: &DailySummary) {
    let date = Local::now().date_naive();
    println!("=== {date} ===\n");

    if summary.entries.is_empty() {
        println!("  No foods logged yet.");
    } else {
        print_entry_table(&summary.entries);
    }
    println!();

    let total = round_kcal(summary.total_calories);
    println!("  TOTAL: {total} kcal");

    match (summary.bmi, summary.target, summary.remaining) {
        (Some(bmi), Some(target), Some(remaining)) => {
            println!("  BMI: {bmi:.1}");
            println!("  TARGET: {target} kcal");
            let remaining = round_kcal(remaining);
            if remaining < 0.0 {
                let over = -remaining;
                println!("  REMAINING: {remaining} kcal (over target by {over})");
            } else {
                println!("  REMAINING: {remaining} kcal");
            }
        }
        _ => {
            eprintln!("  Set height and weight to see BMI and a daily target.");
        }
    }
}
