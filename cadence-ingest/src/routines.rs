//! Routine definitions from JSON.
//!
//! Expected shape: a JSON array of objects with the `routine_tasks` column
//! names (`id`, `content`, `start_date`, `end_date`, `recurrence_type`,
//! `recurrence_interval`, `recurrence_days`, `selected_weekday`,
//! `monthly_ordinal`, `monthly_weekday`, `persistent`, `owner_id`,
//! `team_id`). Unrecognized `recurrence_type` strings deserialize to the
//! never-due `Unknown` variant rather than failing the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::Routine;

/// Parse a JSON array of routine definitions.
pub fn parse_routines_json(json: &str) -> Result<Vec<Routine>> {
    serde_json::from_str(json).context("parsing routine definitions JSON")
}

/// Load routine definitions from a JSON file.
pub fn load_routines_json(path: impl AsRef<Path>) -> Result<Vec<Routine>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_routines_json(&json).with_context(|| format!("in {}", path.display()))
}
