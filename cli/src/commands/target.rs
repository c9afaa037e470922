use anyhow::{Result, bail};
use serde::Serialize;

use kalori_core::TrackerService;
use kalori_core::body::FormulaConfig;
use kalori_core::models::{BodyMetrics, BodyProfile, Goal};

use super::helpers::round_kcal;

pub(crate) fn cmd_target(
    service: &mut TrackerService,
    height_cm: f64,
    weight_kg: f64,
    goal: &str,
    json: bool,
) -> Result<()> {
    #[derive(Serialize)]
    struct TargetOutput<'a> {
        profile: &'a BodyProfile,
        formula: &'a FormulaConfig,
        #[serde(flatten)]
        metrics: BodyMetrics,
    }

    let goal: Goal = goal.parse()?;
    let profile = service.set_profile(height_cm, weight_kg, goal)?;
    let Some(metrics) = service.metrics() else {
        bail!("Height and weight must both be greater than 0 to compute BMI");
    };

    if json {
        let output = TargetOutput {
            profile: &profile,
            formula: service.config(),
            metrics,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_metrics(&metrics, goal, service.config());
    }

    Ok(())
}

pub(super) fn print_metrics(metrics: &BodyMetrics, goal: Goal, formula: &FormulaConfig) {
    let bmi = metrics.bmi;
    let bmr = round_kcal(metrics.bmr);
    let need = metrics.daily_need;
    let target = metrics.target;
    let age = formula.age_years;
    let activity = formula.activity_multiplier;
    println!("  BMI: {bmi:.1}");
    println!("  BMR: {bmr} kcal (age {age})");
    println!("  DAILY NEED: {need} kcal (activity x{activity})");
    println!("  TARGET ({goal}): {target} kcal/day");
}
