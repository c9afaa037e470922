use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: i64,
    pub name: String,
    pub calories_per_100g: f64,
    pub default_portion_g: f64,
}

impl FoodRecord {
    #[must_use]
    pub fn new(id: i64, name: &str, calories_per_100g: f64, default_portion_g: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            calories_per_100g,
            default_portion_g,
        }
    }
}

/// How an entered amount is interpreted: as a weight, or as a count of the
/// food's default portions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Grams,
    Portions,
}

impl Unit {
    #[must_use]
    pub fn from_is_grams(is_grams: bool) -> Self {
        if is_grams { Unit::Grams } else { Unit::Portions }
    }

    #[must_use]
    pub fn is_grams(self) -> bool {
        self == Unit::Grams
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Grams => f.write_str("g"),
            Unit::Portions => f.write_str("portions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Gain,
}

pub const GOALS: &[&str] = &["lose", "gain"];

impl Goal {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Gain => "gain",
        }
    }
}

impl FromStr for Goal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "gain" => Ok(Goal::Gain),
            _ => bail!("Invalid goal '{s}'. Must be one of: {}", GOALS.join(", ")),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal: Goal,
}

/// Grams, portions and calories for one amount of one food.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Serving {
    pub grams: f64,
    pub portions: f64,
    pub calories: f64,
}

/// A food added to the log. Values are fixed at the time it was added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEntry {
    pub id: i64,
    pub food_id: i64,
    pub name: String,
    pub portions: f64,
    pub grams: f64,
    pub calories: f64,
    pub logged_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyMetrics {
    pub bmi: f64,
    pub bmr: f64,
    pub daily_need: i64,
    pub target: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub entries: Vec<LoggedEntry>,
    pub total_calories: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<BodyProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_need: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<f64>,
}

/// Validate a catalog record: name must not be empty, calories must not be
/// negative, and the default portion must be a positive weight.
pub fn validate_food_record(food: &FoodRecord) -> Result<()> {
    if food.name.trim().is_empty() {
        bail!("Food name must not be empty (id {})", food.id);
    }
    if !food.calories_per_100g.is_finite() || food.calories_per_100g < 0.0 {
        bail!(
            "calories_per_100g must be a non-negative number for '{}'",
            food.name
        );
    }
    if !food.default_portion_g.is_finite() || food.default_portion_g <= 0.0 {
        bail!(
            "default_portion_g must be greater than 0 for '{}'",
            food.name
        );
    }
    Ok(())
}

pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        bail!("Amount must be a finite number");
    }
    if amount < 0.0 {
        bail!("Amount must not be negative (got {amount})");
    }
    Ok(())
}

pub fn validate_body_values(height_cm: f64, weight_kg: f64) -> Result<()> {
    if !height_cm.is_finite() || height_cm < 0.0 {
        bail!("Height must be a non-negative number of centimetres");
    }
    if !weight_kg.is_finite() || weight_kg < 0.0 {
        bail!("Weight must be a non-negative number of kilograms");
    }
    Ok(())
}
