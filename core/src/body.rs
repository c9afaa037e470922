//! BMI, basal metabolic rate and daily calorie targets.
//!
//! BMR uses the Mifflin-St Jeor equation with the male constant. Age and
//! activity level are not collected from the user; they come from
//! [`FormulaConfig`], whose defaults are 25 years and a light-activity
//! multiplier of 1.4.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::models::{BodyMetrics, BodyProfile, Goal};

pub const DEFAULT_AGE_YEARS: f64 = 25.0;
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.4;
pub const DEFAULT_GOAL_ADJUSTMENT_KCAL: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormulaConfig {
    pub age_years: f64,
    pub activity_multiplier: f64,
    pub goal_adjustment_kcal: i64,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            age_years: DEFAULT_AGE_YEARS,
            activity_multiplier: DEFAULT_ACTIVITY_MULTIPLIER,
            goal_adjustment_kcal: DEFAULT_GOAL_ADJUSTMENT_KCAL,
        }
    }
}

impl FormulaConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.age_years.is_finite() || self.age_years <= 0.0 {
            bail!("Age must be greater than 0");
        }
        if !self.activity_multiplier.is_finite() || self.activity_multiplier <= 0.0 {
            bail!("Activity multiplier must be greater than 0");
        }
        if self.goal_adjustment_kcal < 0 {
            bail!("Goal adjustment must not be negative");
        }
        Ok(())
    }
}

/// `None` until both height and weight are positive.
#[must_use]
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm > 0.0 && weight_kg > 0.0 {
        let height_m = height_cm / 100.0;
        Some(weight_kg / (height_m * height_m))
    } else {
        None
    }
}

#[must_use]
pub fn bmr(height_cm: f64, weight_kg: f64, config: &FormulaConfig) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * config.age_years + 5.0
}

#[must_use]
pub fn daily_need(bmr: f64, config: &FormulaConfig) -> i64 {
    (bmr * config.activity_multiplier).round() as i64
}

#[must_use]
pub fn target_calories(daily_need: i64, goal: Goal, config: &FormulaConfig) -> i64 {
    match goal {
        Goal::Lose => daily_need - config.goal_adjustment_kcal,
        Goal::Gain => daily_need + config.goal_adjustment_kcal,
    }
}

/// Calories left for the day. Negative once the target is exceeded.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn remaining(target: i64, consumed: f64) -> f64 {
    target as f64 - consumed
}

impl BodyMetrics {
    #[must_use]
    pub fn compute(profile: &BodyProfile, config: &FormulaConfig) -> Option<Self> {
        let bmi = bmi(profile.height_cm, profile.weight_kg)?;
        let bmr = bmr(profile.height_cm, profile.weight_kg, config);
        let daily_need = daily_need(bmr, config);
        let target = target_calories(daily_need, profile.goal, config);
        Some(Self {
            bmi,
            bmr,
            daily_need,
            target,
        })
    }
}
