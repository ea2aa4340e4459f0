//! cadence-ingest: flat-file ingestion of routine definitions and status logs.
//!
//! The engine in `cadence-core` only sees in-memory collections; this crate
//! is the persistence boundary, reduced to files: routines as a JSON array
//! (one object per `routine_tasks` row), completion logs as CSV
//! (`routine_id,date,completed`, one row per `routine_tasks_status` row).

pub mod routines;
pub mod status;
pub mod types;

pub use routines::{load_routines_json, parse_routines_json};
pub use status::{load_status_csv, parse_status_csv, status_by_routine};
pub use types::StatusRow;
