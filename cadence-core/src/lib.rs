//! cadence-core: recurrence occurrence engine for routine dashboards.
//!
//! Pure computation only: given routine definitions, a date window, and
//! per-date completion logs, enumerate due dates and produce the completion
//! aggregates KPI tiles render. All I/O lives in the callers
//! (`cadence-ingest` for files, `cadence-cli` for reporting).

pub mod describe;
pub mod occurrence;
pub mod period;
pub mod reconcile;
pub mod routine;

pub use describe::describe;
pub use occurrence::{due_on, is_nth_weekday_of_month, occurrences_in_range};
pub use period::{days_overdue, ReportPeriod};
pub use reconcile::{aggregate, partition_by_persistence, reconcile, CompletionStats};
pub use routine::{weekday_number, CompletionRecord, RecurrenceType, Routine};
