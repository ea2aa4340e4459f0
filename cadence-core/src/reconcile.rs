//! Completion reconciliation: occurrences vs. the per-date status log.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::occurrence::occurrences_in_range;
use crate::routine::{CompletionRecord, Routine};

/// Aggregate counts for a set of occurrences: the numbers the KPI tiles show.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CompletionStats {
    pub total_occurrences: usize,
    pub completed_occurrences: usize,
    pub pending_occurrences: usize,
    /// Completed / total, in [0, 1]. Defined as 0 when there are no
    /// occurrences at all.
    pub completion_rate: f64,
}

impl CompletionStats {
    fn from_counts(total: usize, completed: usize) -> Self {
        let rate = if total > 0 {
            completed as f64 / total as f64
        } else {
            0.0
        };
        Self {
            total_occurrences: total,
            completed_occurrences: completed,
            pending_occurrences: total - completed,
            completion_rate: rate,
        }
    }

    /// The 0-100 rendering dashboards display.
    pub fn percent(&self) -> f64 {
        self.completion_rate * 100.0
    }
}

/// Classify each occurrence as completed or pending against a routine's
/// status log. Only records with `completed = true` count; a record for a
/// date that is not an occurrence is ignored.
pub fn reconcile(occurrences: &[NaiveDate], records: &[CompletionRecord]) -> CompletionStats {
    let done: HashSet<NaiveDate> = records
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.date)
        .collect();

    let completed = occurrences.iter().filter(|d| done.contains(d)).count();
    CompletionStats::from_counts(occurrences.len(), completed)
}

/// One KPI pass over a whole routine collection: enumerate each routine's
/// occurrences in the window, reconcile against its own status log, and sum
/// before computing a single overall rate.
///
/// Callers partition the collection (by persistence flag, owner, team) and
/// invoke this once per bucket. Routines missing from the status map
/// reconcile against an empty log.
pub fn aggregate(
    routines: &[Routine],
    records_by_routine: &HashMap<i64, Vec<CompletionRecord>>,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> CompletionStats {
    let mut total = 0;
    let mut completed = 0;
    for routine in routines {
        let occurrences = occurrences_in_range(routine, range_start, range_end);
        let records = records_by_routine
            .get(&routine.id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let stats = reconcile(&occurrences, records);
        total += stats.total_occurrences;
        completed += stats.completed_occurrences;
    }
    CompletionStats::from_counts(total, completed)
}

/// Caller-side split into (persistent, non-persistent) buckets, the two
/// standard KPI groupings.
pub fn partition_by_persistence(routines: &[Routine]) -> (Vec<&Routine>, Vec<&Routine>) {
    routines.iter().partition(|r| r.persistent)
}
