//! Core library for the kalori calorie tracker.
//!
//! The catalog and nutrition engine are pure. [`service::TrackerService`]
//! bundles them with a body profile and an in-memory food log for front ends.

pub mod body;
pub mod catalog;
pub mod diary;
pub mod models;
pub mod nutrition;
pub mod service;

pub use body::FormulaConfig;
pub use catalog::{Catalog, builtin_foods};
pub use diary::FoodLog;
pub use models::{BodyMetrics, BodyProfile, DailySummary, FoodRecord, Goal, LoggedEntry, Unit};
pub use nutrition::{compute_calories, search};
pub use service::TrackerService;
