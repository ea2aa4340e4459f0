//! Per-date completion logs from CSV.
//!
//! Expected columns: `routine_id,date,completed` with `date` as
//! `yyyy-mm-dd` and `completed` as `true`/`false` (or `1`/`0`). Rows that
//! fail to parse are skipped, not fatal: a dropped log row under-counts a
//! KPI, which is the acceptable degraded state for reporting.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::CompletionRecord;
use chrono::NaiveDate;

use crate::types::StatusRow;

fn parse_completed(field: &str) -> Option<bool> {
    match field.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// Parse status-log CSV text into flat rows, skipping unparseable ones.
pub fn parse_status_csv(text: &str) -> Result<Vec<StatusRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let Ok(routine_id) = record.get(0).unwrap_or("").trim().parse::<i64>() else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(record.get(1).unwrap_or("").trim(), "%Y-%m-%d")
        else {
            continue;
        };
        let Some(completed) = parse_completed(record.get(2).unwrap_or("")) else {
            continue;
        };

        rows.push(StatusRow {
            routine_id,
            date,
            completed,
        });
    }
    Ok(rows)
}

/// Load a status-log CSV file.
pub fn load_status_csv(path: impl AsRef<Path>) -> Result<Vec<StatusRow>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_status_csv(&text).with_context(|| format!("in {}", path.display()))
}

/// Group flat log rows into the per-routine map the engine's `aggregate`
/// consumes.
pub fn status_by_routine(rows: Vec<StatusRow>) -> HashMap<i64, Vec<CompletionRecord>> {
    let mut by_routine: HashMap<i64, Vec<CompletionRecord>> = HashMap::new();
    for row in rows {
        by_routine.entry(row.routine_id).or_default().push(CompletionRecord {
            date: row.date,
            completed: row.completed,
        });
    }
    by_routine
}
