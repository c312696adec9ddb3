pub mod catalog;
pub mod commands;
pub mod dispatcher;
pub mod ordering;
pub mod queries;
pub mod recommendations;

pub use catalog::{load, Catalog};
pub use dispatcher::ActionDispatcher;

use std::{fs, path::Path};

use crate::{
    error::AppResult,
    models::{ActionResult, Dataset},
};

/// Rendered for action or criterion types the engine does not know
pub const OPERATION_NOT_DEFINED: &str = "operation not defined";

/// Renders `<prefix>: [a, b, c]`
pub(crate) fn render_list(prefix: &str, names: &[String]) -> String {
    format!("{}: [{}]", prefix, names.join(", "))
}

/// Reads a JSON snapshot from disk
pub fn read_dataset(path: &Path) -> AppResult<Dataset> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads a snapshot and runs all of its actions
pub fn run_dataset(dataset: Dataset) -> AppResult<Vec<ActionResult>> {
    let (catalog, actions) = load(dataset)?;
    Ok(ActionDispatcher::new(catalog, actions).run())
}
