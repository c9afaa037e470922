use anyhow::{Context, Result};
use clap::Args;

use kalori_core::FormulaConfig;

/// Overrides for the constants in the daily-target formula.
#[derive(Args, Debug, Clone, Default)]
pub struct FormulaArgs {
    /// Age in years used for BMR (default: 25)
    #[arg(long)]
    pub age: Option<f64>,
    /// Activity multiplier applied to BMR (default: 1.4)
    #[arg(long)]
    pub activity: Option<f64>,
    /// Calories subtracted (lose) or added (gain) to daily need (default: 500)
    #[arg(long)]
    pub adjustment: Option<i64>,
}

pub struct Config {
    pub formula: FormulaConfig,
}

impl Config {
    pub fn load(args: &FormulaArgs) -> Result<Self> {
        let defaults = FormulaConfig::default();
        let formula = FormulaConfig {
            age_years: args.age.unwrap_or(defaults.age_years),
            activity_multiplier: args.activity.unwrap_or(defaults.activity_multiplier),
            goal_adjustment_kcal: args.adjustment.unwrap_or(defaults.goal_adjustment_kcal),
        };
        formula
            .validate()
            .context("Invalid formula settings")?;
        Ok(Config { formula })
    }
}
