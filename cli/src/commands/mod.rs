mod helpers;
mod search;
mod session;
mod summary;
mod target;

use anyhow::Result;

use kalori_core::{FoodRecord, TrackerService};

use helpers::{print_food_table, prompt_choice};

pub(crate) use search::{cmd_calories, cmd_foods, cmd_search};
pub(crate) use session::cmd_session;
pub(crate) use summary::cmd_plan;
pub(crate) use target::cmd_target;

/// Resolve a food id or name query to a catalog record.
///
/// An exact (case-insensitive) name match wins over partial matches. With
/// several partial matches the user is asked to pick one. `None` means
/// nothing matched.
pub(super) fn resolve_food(service: &TrackerService, query: &str) -> Result<Option<FoodRecord>> {
    let query = query.trim();
    if let Ok(id) = query.parse::<i64>() {
        return Ok(service.catalog().get(id).cloned());
    }

    let matches = service.search_foods(query);
    let wanted = query.to_lowercase();
    if let Some(exact) = matches.iter().find(|f| f.name.to_lowercase() == wanted) {
        return Ok(Some((*exact).clone()));
    }

    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0].clone())),
        n => {
            tracing::debug!(query, matches = n, "ambiguous food query");
            print_food_table(&matches);
            let idx = prompt_choice(n)?;
            Ok(Some(matches[idx].clone()))
        }
    }
}
