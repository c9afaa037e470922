use anyhow::Result;
use serde::Serialize;
use std::process;

use kalori_core::TrackerService;
use kalori_core::models::{FoodRecord, Unit};

use super::helpers::{json_error, parse_amount, print_food_table, serving_line};
use super::resolve_food;

pub(crate) fn cmd_foods(service: &TrackerService, json: bool) -> Result<()> {
    let foods: Vec<&FoodRecord> = service.catalog().records().iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&foods)?);
    } else {
        print_food_table(&foods);
    }

    Ok(())
}

pub(crate) fn cmd_search(service: &TrackerService, query: &str, json: bool) -> Result<()> {
    let results = service.search_foods(query);

    if results.is_empty() {
        if json {
            println!("[]");
        } else if query.trim().is_empty() {
            eprintln!("Type part of a food name to search");
        } else {
            eprintln!("No results found for '{query}'");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_food_table(&results);
    }

    Ok(())
}

pub(crate) fn cmd_calories(
    service: &TrackerService,
    food_query: &str,
    amount_str: &str,
    json: bool,
) -> Result<()> {
    #[derive(Serialize)]
    struct CaloriesOutput<'a> {
        food: &'a FoodRecord,
        amount: f64,
        unit: Unit,
        grams: f64,
        portions: f64,
        calories: f64,
    }

    let (amount, unit) = parse_amount(amount_str)?;

    let Some(food) = resolve_food(service, food_query)? else {
        if json {
            println!(
                "{}",
                json_error(&format!("No food found for '{food_query}'"))
            );
        } else {
            eprintln!("No food found for '{food_query}'");
        }
        process::exit(2);
    };

    let serving = service.calories_for(food.id, amount, unit)?;

    if json {
        let output = CaloriesOutput {
            food: &food,
            amount,
            unit,
            grams: serving.grams,
            portions: serving.portions,
            calories: serving.calories,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{}",
            serving_line(&food.name, serving.portions, serving.grams, serving.calories)
        );
    }

    Ok(())
}
