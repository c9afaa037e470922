use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use kalori_core::models::{FoodRecord, LoggedEntry, Unit};

/// Parse an amount with an optional unit.
/// Accepts: "2", "1.5p", "2 portions", "150g", "150 grams".
/// A bare number is a count of portions.
pub(crate) fn parse_amount(s: &str) -> Result<(f64, Unit)> {
    let s = s.trim();
    let idx = s.find(|c: char| c.is_alphabetic()).unwrap_or(s.len());
    let (num_part, unit_part) = s.split_at(idx);

    let qty: f64 = num_part.trim().parse().with_context(|| {
        format!("Invalid amount: '{s}'. Use a number like '2', '1.5p' or '150g'")
    })?;
    let unit = parse_unit(unit_part)?;

    if !qty.is_finite() || qty <= 0.0 {
        bail!("Amount must be greater than 0");
    }
    Ok((qty, unit))
}

pub(crate) fn parse_unit(s: &str) -> Result<Unit> {
    match s.trim().to_lowercase().as_str() {
        "" | "p" | "portion" | "portions" | "porsiyon" => Ok(Unit::Portions),
        "g" | "gr" | "gram" | "grams" => Ok(Unit::Grams),
        other => bail!("Unknown unit '{other}'. Use portions (p) or grams (g)"),
    }
}

/// Split "pilav=2" or "tavuk göğsü=150g" into the food query and the amount.
pub(crate) fn parse_food_amount(s: &str) -> Result<(String, f64, Unit)> {
    let (food, amount) = s
        .rsplit_once('=')
        .with_context(|| format!("Invalid entry '{s}'. Use 'food=amount' (e.g. 'pilav=2')"))?;
    let food = food.trim();
    if food.is_empty() {
        bail!("Missing food name in '{s}'");
    }
    let (qty, unit) = parse_amount(amount)?;
    Ok((food.to_string(), qty, unit))
}

pub(crate) fn prompt_choice(count: usize) -> Result<usize> {
    eprint!("\nSelect a food (1-{count}): ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    let n: usize = line.trim().parse().context("Invalid number")?;
    if n < 1 || n > count {
        bail!("Selection out of range");
    }
    Ok(n - 1)
}

pub(crate) fn print_food_table(foods: &[&FoodRecord]) {
    #[derive(Tabled)]
    struct FoodRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Cal/100g")]
        calories: String,
        #[tabled(rename = "Portion")]
        portion: String,
        #[tabled(rename = "Cal/portion")]
        portion_calories: String,
    }

    let rows: Vec<FoodRow> = foods
        .iter()
        .enumerate()
        .map(|(i, f)| FoodRow {
            idx: i + 1,
            id: f.id,
            name: truncate(&f.name, 35),
            calories: format!("{:.0}", f.calories_per_100g),
            portion: format!("{:.0}g", f.default_portion_g),
            portion_calories: {
                let cal = round_kcal(kalori_core::compute_calories(f, 1.0, Unit::Portions));
                format!("{cal}")
            },
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..6)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_entry_table(entries: &[LoggedEntry]) {
    #[derive(Tabled)]
    struct EntryRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Portions")]
        portions: String,
        #[tabled(rename = "Grams")]
        grams: String,
        #[tabled(rename = "kcal")]
        calories: String,
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|e| EntryRow {
            id: e.id,
            name: truncate(&e.name, 35),
            portions: format!("{:.1}", no_neg_zero(e.portions)),
            grams: format!("{:.0}g", no_neg_zero(e.grams)),
            calories: format!("{}", round_kcal(e.calories)),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..5)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

/// Whole kcal for display, halves rounded away from zero like stored entries.
pub(crate) fn round_kcal(v: f64) -> f64 {
    no_neg_zero(v.round())
}

/// "Pilav: 2.0 portions • 300g — 390 kcal"
pub(crate) fn serving_line(name: &str, portions: f64, grams: f64, calories: f64) -> String {
    let portions = no_neg_zero(portions);
    let grams = no_neg_zero(grams);
    let cal = round_kcal(calories);
    format!("{name}: {portions:.1} portions • {grams:.0}g — {cal} kcal")
}

pub(crate) fn no_neg_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
