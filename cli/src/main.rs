mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{cmd_calories, cmd_foods, cmd_plan, cmd_search, cmd_session, cmd_target};
use crate::config::{Config, FormulaArgs};
use kalori_core::TrackerService;

#[derive(Parser)]
#[command(
    name = "kalori",
    version,
    about = "A small calorie tracker: BMI, a daily target and a food log"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every food in the catalog
    Foods {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search foods by name
    Search {
        /// Part of a food name (case-insensitive)
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Calories for an amount of one food
    Calories {
        /// Food name or catalog ID
        food: String,
        /// Amount: "2" or "1.5p" for portions, "150g" for grams
        amount: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show BMI, BMR and the daily calorie target
    Target {
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Goal: lose or gain
        #[arg(short, long, default_value = "lose")]
        goal: String,
        #[command(flatten)]
        formula: FormulaArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a day's foods in one go and show the totals
    Plan {
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Goal: lose or gain
        #[arg(short, long, default_value = "lose")]
        goal: String,
        /// Food to log as "food=amount" (e.g. "pilav=2", "zeytin=30g"); repeatable
        #[arg(short, long = "add", value_name = "FOOD=AMOUNT")]
        add: Vec<String>,
        #[command(flatten)]
        formula: FormulaArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive session; the food log lives until you quit
    Session {
        #[command(flatten)]
        formula: FormulaArgs,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn service_for(formula: &FormulaArgs) -> Result<TrackerService> {
    let config = Config::load(formula)?;
    tracing::debug!(formula = ?config.formula, "formula settings loaded");
    TrackerService::with_config(config.formula)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Foods { json } => cmd_foods(&TrackerService::new(), json),
        Commands::Search { query, json } => cmd_search(&TrackerService::new(), &query, json),
        Commands::Calories { food, amount, json } => {
            cmd_calories(&TrackerService::new(), &food, &amount, json)
        }
        Commands::Target {
            height,
            weight,
            goal,
            formula,
            json,
        } => {
            let mut service = service_for(&formula)?;
            cmd_target(&mut service, height, weight, &goal, json)
        }
        Commands::Plan {
            height,
            weight,
            goal,
            add,
            formula,
            json,
        } => {
            let mut service = service_for(&formula)?;
            cmd_plan(&mut service, height, weight, &goal, &add, json)
        }
        Commands::Session { formula } => {
            let mut service = service_for(&formula)?;
            cmd_session(&mut service)
        }
    }
}
