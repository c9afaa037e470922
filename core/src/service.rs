use anyhow::{Context, Result};

use crate::body::{self, FormulaConfig};
use crate::catalog::Catalog;
use crate::diary::FoodLog;
use crate::models::{
    BodyMetrics, BodyProfile, DailySummary, FoodRecord, Goal, LoggedEntry, Serving, Unit,
    validate_amount, validate_body_values,
};
use crate::nutrition;

/// Everything a front end needs for one day of tracking: the food catalog,
/// the user's body profile and the food log.
pub struct TrackerService {
    catalog: Catalog,
    config: FormulaConfig,
    profile: Option<BodyProfile>,
    log: FoodLog,
}

impl Default for TrackerService {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: Catalog::default(),
            config: FormulaConfig::default(),
            profile: None,
            log: FoodLog::new(),
        }
    }

    pub fn with_catalog(catalog: Catalog, config: FormulaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            profile: None,
            log: FoodLog::new(),
        })
    }

    pub fn with_config(config: FormulaConfig) -> Result<Self> {
        Self::with_catalog(Catalog::default(), config)
    }

    // --- Catalog ---

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &FormulaConfig {
        &self.config
    }

    #[must_use]
    pub fn search_foods(&self, query: &str) -> Vec<&FoodRecord> {
        self.catalog.search(query)
    }

    pub fn get_food(&self, id: i64) -> Result<&FoodRecord> {
        self.catalog
            .get(id)
            .with_context(|| format!("No food with id {id}"))
    }

    pub fn calories_for(&self, food_id: i64, amount: f64, unit: Unit) -> Result<Serving> {
        validate_amount(amount)?;
        let food = self.get_food(food_id)?;
        Ok(nutrition::measure(food, amount, unit))
    }

    // --- Profile ---

    pub fn set_profile(
        &mut self,
        height_cm: f64,
        weight_kg: f64,
        goal: Goal,
    ) -> Result<BodyProfile> {
        validate_body_values(height_cm, weight_kg)?;
        let profile = BodyProfile {
            height_cm,
            weight_kg,
            goal,
        };
        self.profile = Some(profile);
        Ok(profile)
    }

    #[must_use]
    pub fn profile(&self) -> Option<&BodyProfile> {
        self.profile.as_ref()
    }

    pub fn clear_profile(&mut self) -> bool {
        self.profile.take().is_some()
    }

    /// `None` until a profile with positive height and weight is set.
    #[must_use]
    pub fn metrics(&self) -> Option<BodyMetrics> {
        self.profile
            .as_ref()
            .and_then(|p| BodyMetrics::compute(p, &self.config))
    }

    // --- Food log ---

    pub fn log_food(&mut self, food_id: i64, amount: f64, unit: Unit) -> Result<LoggedEntry> {
        let food = self.get_food(food_id)?.clone();
        self.log.add(&food, amount, unit)
    }

    pub fn remove_entry(&mut self, id: i64) -> bool {
        self.log.remove(id)
    }

    #[must_use]
    pub fn entries(&self) -> &[LoggedEntry] {
        self.log.entries()
    }

    pub fn clear_entries(&mut self) {
        self.log.clear();
    }

    #[must_use]
    pub fn daily_summary(&self) -> DailySummary {
        let total_calories = self.log.total_calories();
        let metrics = self.metrics();
        DailySummary {
            entries: self.log.entries().to_vec(),
            total_calories,
            profile: self.profile,
            bmi: metrics.map(|m| m.bmi),
            daily_need: metrics.map(|m| m.daily_need),
            target: metrics.map(|m| m.target),
            remaining: metrics.map(|m| body::remaining(m.target, total_calories)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_foods_uses_catalog() {
        let svc = TrackerService::new();
        let results = svc.search_foods("pilav");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
        assert!(svc.search_foods("").is_empty());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = Catalog::new(vec![
            FoodRecord::new(100, "Elma", 52.0, 180.0),
            FoodRecord::new(101, "Armut", 57.0, 170.0),
        ])
        .unwrap();
        let svc = TrackerService::with_catalog(catalog, FormulaConfig::default()).unwrap();
        assert_eq!(svc.catalog().len(), 2);
        assert_eq!(svc.search_foods("ELMA")[0].id, 100);
        assert!(svc.get_food(1).is_err());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = FormulaConfig {
            activity_multiplier: 0.0,
            ..FormulaConfig::default()
        };
        assert!(TrackerService::with_config(config).is_err());
    }

    #[test]
    fn test_calories_for() {
        let svc = TrackerService::new();
        let serving = svc.calories_for(1, 100.0, Unit::Grams).unwrap();
        assert!((serving.calories - 165.0).abs() < 1e-9);
        let serving = svc.calories_for(1, 1.0, Unit::Portions).unwrap();
        assert!((serving.calories - 247.5).abs() < 1e-9);
        assert!(svc.calories_for(1, -1.0, Unit::Grams).is_err());
        assert!(svc.calories_for(999, 1.0, Unit::Grams).is_err());
    }

    #[test]
    fn test_log_and_remove() {
        let mut svc = TrackerService::new();
        let entry = svc.log_food(2, 2.0, Unit::Portions).unwrap();
        assert!((entry.calories - 520.0).abs() < f64::EPSILON);
        assert_eq!(svc.entries().len(), 1);
        assert!(svc.remove_entry(entry.id));
        assert!(svc.entries().is_empty());
        assert!(!svc.remove_entry(entry.id));
    }

    #[test]
    fn test_log_unknown_food() {
        let mut svc = TrackerService::new();
        let err = svc.log_food(999, 1.0, Unit::Portions).unwrap_err();
        assert_eq!(err.to_string(), "No food with id 999");
        assert!(svc.entries().is_empty());
    }

    #[test]
    fn test_clear_entries_keeps_ids_moving() {
        let mut svc = TrackerService::new();
        let first = svc.log_food(2, 1.0, Unit::Portions).unwrap();
        svc.clear_entries();
        assert!(svc.entries().is_empty());
        assert!(svc.daily_summary().total_calories.abs() < f64::EPSILON);

        let next = svc.log_food(2, 1.0, Unit::Portions).unwrap();
        assert!(next.id > first.id);
    }

    #[test]
    fn test_profile_set_and_clear() {
        let mut svc = TrackerService::new();
        assert!(svc.profile().is_none());
        assert!(svc.metrics().is_none());

        svc.set_profile(170.0, 70.0, Goal::Lose).unwrap();
        assert_eq!(svc.profile().unwrap().goal, Goal::Lose);
        assert_eq!(svc.metrics().unwrap().target, 1800);

        assert!(svc.clear_profile());
        assert!(!svc.clear_profile());
    }

    #[test]
    fn test_profile_rejects_negative() {
        let mut svc = TrackerService::new();
        assert!(svc.set_profile(-170.0, 70.0, Goal::Gain).is_err());
        assert!(svc.profile().is_none());
    }

    #[test]
    fn test_summary_without_profile() {
        let mut svc = TrackerService::new();
        svc.log_food(2, 1.0, Unit::Portions).unwrap();
        let summary = svc.daily_summary();
        assert_eq!(summary.entries.len(), 1);
        assert!((summary.total_calories - 260.0).abs() < f64::EPSILON);
        assert!(summary.bmi.is_none());
        assert!(summary.target.is_none());
        assert!(summary.remaining.is_none());
    }

    #[test]
    fn test_summary_zero_weight_hides_metrics() {
        let mut svc = TrackerService::new();
        svc.set_profile(170.0, 0.0, Goal::Lose).unwrap();
        let summary = svc.daily_summary();
        assert!(summary.profile.is_some());
        assert!(summary.bmi.is_none());
        assert!(summary.remaining.is_none());
    }

    #[test]
    fn test_summary_with_profile() {
        let mut svc = TrackerService::new();
        svc.set_profile(170.0, 70.0, Goal::Lose).unwrap();
        svc.log_food(2, 1.0, Unit::Portions).unwrap();
        svc.log_food(1, 150.0, Unit::Grams).unwrap();

        let summary = svc.daily_summary();
        // 260 + 248
        assert!((summary.total_calories - 508.0).abs() < f64::EPSILON);
        assert_eq!(summary.daily_need, Some(2300));
        assert_eq!(summary.target, Some(1800));
        assert!((summary.remaining.unwrap() - 1292.0).abs() < f64::EPSILON);
        assert!((summary.bmi.unwrap() - 24.22).abs() < 0.01);
    }

    #[test]
    fn test_summary_over_target() {
        let mut svc = TrackerService::new();
        svc.set_profile(150.0, 45.0, Goal::Lose).unwrap();
        for _ in 0..4 {
            svc.log_food(8, 2.0, Unit::Portions).unwrap();
        }
        svc.log_food(2, 3.0, Unit::Portions).unwrap();
        let summary = svc.daily_summary();
        assert!(summary.remaining.unwrap() < 0.0);
    }

    #[test]
    fn test_summary_serializes() {
        let mut svc = TrackerService::new();
        svc.set_profile(170.0, 70.0, Goal::Gain).unwrap();
        svc.log_food(10, 30.0, Unit::Grams).unwrap();
        let json = serde_json::to_value(svc.daily_summary()).unwrap();
        assert_eq!(json["target"], 2800);
        assert_eq!(json["profile"]["goal"], "gain");
        assert_eq!(json["entries"][0]["name"], "Zeytin");
    }
}
