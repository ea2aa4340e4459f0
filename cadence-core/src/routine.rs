//! Routine model: recurrence rules and per-date completion records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Discriminant selecting which due-date predicate applies.
///
/// `Unknown` absorbs any unrecognized string coming from stored data so a
/// stale or future rule type degrades to "never due" instead of failing the
/// whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecurrenceType {
    Daily,
    Weekly,
    Biweekly,
    Triweekly,
    Quadweekly,
    Monthly,
    MonthlyWeekday,
    Unknown,
}

impl From<String> for RecurrenceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "daily" => RecurrenceType::Daily,
            "weekly" => RecurrenceType::Weekly,
            "biweekly" => RecurrenceType::Biweekly,
            "triweekly" => RecurrenceType::Triweekly,
            "quadweekly" => RecurrenceType::Quadweekly,
            "monthly" => RecurrenceType::Monthly,
            "monthly_weekday" => RecurrenceType::MonthlyWeekday,
            _ => RecurrenceType::Unknown,
        }
    }
}

impl From<RecurrenceType> for String {
    fn from(t: RecurrenceType) -> Self {
        match t {
            RecurrenceType::Daily => "daily",
            RecurrenceType::Weekly => "weekly",
            RecurrenceType::Biweekly => "biweekly",
            RecurrenceType::Triweekly => "triweekly",
            RecurrenceType::Quadweekly => "quadweekly",
            RecurrenceType::Monthly => "monthly",
            RecurrenceType::MonthlyWeekday => "monthly_weekday",
            RecurrenceType::Unknown => "unknown",
        }
        .to_string()
    }
}

/// A recurring routine as stored by the dashboard.
///
/// Only the fields relevant to the active `recurrence_type` are meaningful;
/// the rest ride along with whatever the row happened to contain. Missing
/// required fields make the routine never due, they are not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: i64,

    /// Human description shown in tables and summaries.
    pub content: String,

    /// First date the routine can occur (inclusive).
    pub start_date: NaiveDate,

    /// Last date the routine can occur (inclusive). `None` means no end.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    pub recurrence_type: RecurrenceType,

    /// Every N days, counted from `start_date`. `daily` only.
    #[serde(default = "default_interval")]
    pub recurrence_interval: i64,

    /// Weekday numbers 1=Mon..7=Sun. `weekly` only; empty means never due.
    #[serde(default)]
    pub recurrence_days: Vec<u32>,

    /// Single weekday 1..7 for `biweekly`/`triweekly`/`quadweekly`.
    #[serde(default)]
    pub selected_weekday: Option<u32>,

    /// 1..4, or -1 for "last". `monthly_weekday` only.
    #[serde(default)]
    pub monthly_ordinal: Option<i32>,

    /// Weekday 1..7. `monthly_weekday` only.
    #[serde(default)]
    pub monthly_weekday: Option<u32>,

    /// Whether unmet occurrences stay visible on later days. Callers bucket
    /// on this; the engine itself never branches on it.
    #[serde(default)]
    pub persistent: bool,

    /// Reporting dimension: the user the routine is assigned to.
    #[serde(default)]
    pub owner_id: Option<i64>,

    /// Reporting dimension: the team/list the routine belongs to.
    #[serde(default)]
    pub team_id: Option<i64>,
}

fn default_interval() -> i64 {
    1
}

impl Routine {
    pub fn new(id: i64, content: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id,
            content: content.into(),
            start_date,
            end_date: None,
            recurrence_type: RecurrenceType::Daily,
            recurrence_interval: 1,
            recurrence_days: Vec::new(),
            selected_weekday: None,
            monthly_ordinal: None,
            monthly_weekday: None,
            persistent: false,
            owner_id: None,
            team_id: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_type(mut self, recurrence_type: RecurrenceType) -> Self {
        self.recurrence_type = recurrence_type;
        self
    }

    pub fn with_interval(mut self, days: i64) -> Self {
        self.recurrence_interval = days;
        self
    }

    pub fn with_days(mut self, days: impl Into<Vec<u32>>) -> Self {
        self.recurrence_days = days.into();
        self
    }

    pub fn with_selected_weekday(mut self, weekday: u32) -> Self {
        self.selected_weekday = Some(weekday);
        self
    }

    pub fn with_monthly_weekday(mut self, ordinal: i32, weekday: u32) -> Self {
        self.monthly_ordinal = Some(ordinal);
        self.monthly_weekday = Some(weekday);
        self
    }

    pub fn with_persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }
}

/// One row of the per-date status log for a routine: was the routine done
/// on this date? Only `completed = true` rows count toward the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub date: NaiveDate,
    pub completed: bool,
}

/// ISO weekday number, 1=Monday..7=Sunday.
///
/// This is the one place a native date's weekday is read; everything else
/// in the crate speaks the 1..7 Monday-start convention the stored
/// `recurrence_days` use.
pub fn weekday_number(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}
