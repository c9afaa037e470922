//! Food search and calorie arithmetic.
//!
//! Everything here is pure. Amounts are not validated: a negative amount
//! produces a negative result rather than an error. Callers that accept user
//! input check it first (see [`crate::models::validate_amount`]).

use crate::catalog::Catalog;
use crate::models::{FoodRecord, Serving, Unit};

/// Search the built-in catalog.
#[must_use]
pub fn search(query: &str) -> Vec<&'static FoodRecord> {
    Catalog::builtin().search(query)
}

/// Case-insensitive substring match on food names, in input order.
///
/// A query that is empty after trimming matches nothing. It does not match
/// everything.
#[must_use]
pub fn search_records<'a>(records: &'a [FoodRecord], query: &str) -> Vec<&'a FoodRecord> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return Vec::new();
    }
    let matches: Vec<&FoodRecord> = records
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&normalized))
        .collect();
    tracing::debug!(query = %normalized, matches = matches.len(), "food search");
    matches
}

#[must_use]
pub fn compute_calories(food: &FoodRecord, amount: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Grams => food.calories_per_100g * amount / 100.0,
        Unit::Portions => food.calories_per_100g * food.default_portion_g * amount / 100.0,
    }
}

#[must_use]
pub fn to_grams(food: &FoodRecord, amount: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Grams => amount,
        Unit::Portions => amount * food.default_portion_g,
    }
}

#[must_use]
pub fn to_portions(food: &FoodRecord, amount: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Grams => amount / food.default_portion_g,
        Unit::Portions => amount,
    }
}

/// Grams, portions and unrounded calories for `amount` of `food`.
#[must_use]
pub fn measure(food: &FoodRecord, amount: f64, unit: Unit) -> Serving {
    Serving {
        grams: to_grams(food, amount, unit),
        portions: to_portions(food, amount, unit),
        calories: compute_calories(food, amount, unit),
    }
}
