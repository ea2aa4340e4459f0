//! Human-readable recurrence summaries for tables and listings.

use chrono::Datelike;

use crate::routine::{RecurrenceType, Routine};

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WEEKDAY_ABBREVS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn weekday_name(number: u32) -> &'static str {
    WEEKDAY_NAMES
        .get(number.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

fn weekday_abbrev(number: u32) -> &'static str {
    WEEKDAY_ABBREVS
        .get(number.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

fn ordinal_name(ordinal: i32) -> &'static str {
    match ordinal {
        1 => "First",
        2 => "Second",
        3 => "Third",
        4 => "Fourth",
        -1 => "Last",
        _ => "First",
    }
}

/// One-line summary of a routine's recurrence rule, e.g. "Weekly (Mon, Wed)"
/// or "Last Friday of the month".
pub fn describe(routine: &Routine) -> String {
    match routine.recurrence_type {
        RecurrenceType::Daily => {
            let interval = routine.recurrence_interval.max(1);
            if interval > 1 {
                format!("Daily (every {interval} days)")
            } else {
                "Daily".to_string()
            }
        }
        RecurrenceType::Weekly => {
            let days: Vec<&str> = routine
                .recurrence_days
                .iter()
                .map(|d| weekday_abbrev(*d))
                .collect();
            format!("Weekly ({})", days.join(", "))
        }
        RecurrenceType::Monthly => {
            format!("Monthly (day {})", routine.start_date.day())
        }
        RecurrenceType::Biweekly | RecurrenceType::Triweekly | RecurrenceType::Quadweekly => {
            let weeks = match routine.recurrence_type {
                RecurrenceType::Biweekly => 2,
                RecurrenceType::Triweekly => 3,
                _ => 4,
            };
            let day = routine
                .selected_weekday
                .map(weekday_name)
                .unwrap_or("unset weekday");
            format!("Every {weeks} weeks ({day})")
        }
        RecurrenceType::MonthlyWeekday => {
            match (routine.monthly_ordinal, routine.monthly_weekday) {
                (Some(ordinal), Some(weekday)) => format!(
                    "{} {} of the month",
                    ordinal_name(ordinal),
                    weekday_name(weekday)
                ),
                _ => "Monthly pattern (incomplete)".to_string(),
            }
        }
        RecurrenceType::Unknown => "Unrecognized rule".to_string(),
    }
}
