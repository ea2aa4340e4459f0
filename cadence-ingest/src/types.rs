use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the flat status log, before grouping by routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRow {
    pub routine_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
}
