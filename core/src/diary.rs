use anyhow::Result;
use chrono::Local;

use crate::models::{FoodRecord, LoggedEntry, Unit, validate_amount};
use crate::nutrition;

/// In-memory list of foods eaten today.
///
/// Entry ids come from a counter owned by the log, so two entries added in
/// quick succession never share an id. Ids are not reused after removal.
#[derive(Debug, Clone)]
pub struct FoodLog {
    entries: Vec<LoggedEntry>,
    next_id: i64,
}

impl Default for FoodLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Append `amount` of `food`. Calories are rounded to whole kcal here and
    /// stored that way.
    pub fn add(&mut self, food: &FoodRecord, amount: f64, unit: Unit) -> Result<LoggedEntry> {
        validate_amount(amount)?;
        let serving = nutrition::measure(food, amount, unit);

        let entry = LoggedEntry {
            id: self.next_id,
            food_id: food.id,
            name: food.name.clone(),
            portions: serving.portions,
            grams: serving.grams,
            calories: serving.calories.round(),
            logged_at: Local::now().to_rfc3339(),
        };
        self.next_id += 1;

        tracing::debug!(
            id = entry.id,
            food = %entry.name,
            grams = entry.grams,
            calories = entry.calories,
            "entry added"
        );
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        tracing::debug!(id, removed, "entry remove");
        removed
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&LoggedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[LoggedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn total_calories(&self) -> f64 {
        total_calories(&self.entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[must_use]
pub fn total_calories(entries: &[LoggedEntry]) -> f64 {
    entries.iter().map(|e| e.calories).sum()
}
