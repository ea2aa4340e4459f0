use anyhow::{bail, Result};
use cadence_core::{
    aggregate, days_overdue, describe, occurrences_in_range, partition_by_persistence, reconcile,
    CompletionRecord, CompletionStats, ReportPeriod, Routine,
};
use cadence_ingest::{load_routines_json, load_status_csv, status_by_routine};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cadence", version, about = "Routine occurrence and KPI reporting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// Preset reporting window ending today: 7d, 30d or 60d (default: 30d)
    #[arg(long)]
    period: Option<String>,

    /// Custom window start (yyyy-mm-dd); requires --to
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Custom window end (yyyy-mm-dd); requires --from
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Completion KPIs over a reporting window, split by persistence bucket
    Kpis {
        /// Routine definitions (JSON array)
        #[arg(long)]
        routines: PathBuf,

        /// Completion log (CSV: routine_id,date,completed)
        #[arg(long)]
        status: Option<PathBuf>,

        #[command(flatten)]
        window: WindowArgs,

        /// Only routines belonging to this team
        #[arg(long)]
        team: Option<i64>,

        /// Only routines assigned to this owner
        #[arg(long)]
        owner: Option<i64>,
    },

    /// Debug listing of one routine's due dates in a window
    Occurrences {
        /// Routine definitions (JSON array)
        #[arg(long)]
        routines: PathBuf,

        /// Completion log (CSV: routine_id,date,completed)
        #[arg(long)]
        status: Option<PathBuf>,

        /// Routine id to enumerate
        #[arg(long)]
        id: i64,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// List routines with human-readable recurrence summaries
    Describe {
        /// Routine definitions (JSON array)
        #[arg(long)]
        routines: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match cli.command {
        Command::Kpis {
            routines,
            status,
            window,
            team,
            owner,
        } => {
            let routines = load_routines_json(&routines)?;
            let records = load_records(status)?;
            let (start, end) = resolve_window(&window, today)?;
            print_kpis(&routines, &records, start, end, team, owner);
        }

        Command::Occurrences {
            routines,
            status,
            id,
            window,
        } => {
            let routines = load_routines_json(&routines)?;
            let records = load_records(status)?;
            let (start, end) = resolve_window(&window, today)?;
            print_occurrences(&routines, &records, id, start, end, today)?;
        }

        Command::Describe { routines } => {
            let routines = load_routines_json(&routines)?;
            print_descriptions(&routines);
        }
    }

    Ok(())
}

fn load_records(status: Option<PathBuf>) -> Result<HashMap<i64, Vec<CompletionRecord>>> {
    match status {
        Some(path) => Ok(status_by_routine(load_status_csv(path)?)),
        None => Ok(HashMap::new()),
    }
}

/// Resolve --period / --from / --to into an inclusive window ending today
/// by default.
fn resolve_window(window: &WindowArgs, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let period = match (&window.period, window.from, window.to) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            bail!("--period and --from/--to are mutually exclusive")
        }
        (None, Some(from), Some(to)) => {
            if from > to {
                bail!("--from {from} is after --to {to}");
            }
            ReportPeriod::Custom { start: from, end: to }
        }
        (None, Some(_), None) | (None, None, Some(_)) => {
            bail!("--from and --to must be given together")
        }
        (Some(preset), None, None) => match preset.as_str() {
            "7d" => ReportPeriod::Last7Days,
            "30d" => ReportPeriod::Last30Days,
            "60d" => ReportPeriod::Last60Days,
            other => bail!("unknown period '{other}' (expected 7d, 30d or 60d)"),
        },
        (None, None, None) => ReportPeriod::default(),
    };
    Ok(period.resolve(today))
}

fn print_stats_line(label: &str, stats: &CompletionStats) {
    println!(
        "  {label:<15} total {:>4}  completed {:>4}  pending {:>4}  rate {:>5.1}%",
        stats.total_occurrences,
        stats.completed_occurrences,
        stats.pending_occurrences,
        stats.percent()
    );
}

fn print_kpis(
    routines: &[Routine],
    records: &HashMap<i64, Vec<CompletionRecord>>,
    start: NaiveDate,
    end: NaiveDate,
    team: Option<i64>,
    owner: Option<i64>,
) {
    let selected: Vec<Routine> = routines
        .iter()
        .filter(|r| team.is_none_or(|t| r.team_id == Some(t)))
        .filter(|r| owner.is_none_or(|o| r.owner_id == Some(o)))
        .cloned()
        .collect();

    println!(
        "Routine discipline {start}..{end} ({} routine{})",
        selected.len(),
        if selected.len() == 1 { "" } else { "s" }
    );

    let overall = aggregate(&selected, records, start, end);
    print_stats_line("all:", &overall);

    let (persistent, temporary) = partition_by_persistence(&selected);
    let persistent: Vec<Routine> = persistent.into_iter().cloned().collect();
    let temporary: Vec<Routine> = temporary.into_iter().cloned().collect();
    print_stats_line("persistent:", &aggregate(&persistent, records, start, end));
    print_stats_line("temporary:", &aggregate(&temporary, records, start, end));
}

fn print_occurrences(
    routines: &[Routine],
    records: &HashMap<i64, Vec<CompletionRecord>>,
    id: i64,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let Some(routine) = routines.iter().find(|r| r.id == id) else {
        bail!("no routine with id {id}");
    };

    let occurrences = occurrences_in_range(routine, start, end);
    let empty = Vec::new();
    let log = records.get(&id).unwrap_or(&empty);
    let stats = reconcile(&occurrences, log);

    println!("{} — {}", routine.content, describe(routine));
    println!("{start}..{end}: {} occurrence(s)", occurrences.len());

    let done: std::collections::HashSet<NaiveDate> = log
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.date)
        .collect();

    for date in &occurrences {
        let mark = if done.contains(date) { "done" } else { "pending" };
        let lag = days_overdue(*date, today);
        if mark == "pending" && lag > 0 {
            println!("  {date}  {mark} ({lag} day(s) overdue)");
        } else {
            println!("  {date}  {mark}");
        }
    }

    print_stats_line("stats:", &stats);
    Ok(())
}

fn print_descriptions(routines: &[Routine]) {
    for routine in routines {
        let end = routine
            .end_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open-ended".to_string());
        println!(
            "{:>5}  {:<40} {}  [{} .. {}]",
            routine.id,
            routine.content,
            describe(routine),
            routine.start_date,
            end
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window(period: Option<&str>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> WindowArgs {
        WindowArgs {
            period: period.map(String::from),
            from,
            to,
        }
    }

    #[test]
    fn default_window_is_trailing_thirty_days() {
        let today = d(2024, 3, 15);
        let (start, end) = resolve_window(&window(None, None, None), today).unwrap();
        assert_eq!((start, end), (d(2024, 2, 14), today));
    }

    #[test]
    fn preset_and_custom_windows() {
        let today = d(2024, 3, 15);
        let (start, _) = resolve_window(&window(Some("7d"), None, None), today).unwrap();
        assert_eq!(start, d(2024, 3, 8));

        let (start, end) =
            resolve_window(&window(None, Some(d(2024, 1, 1)), Some(d(2024, 1, 31))), today)
                .unwrap();
        assert_eq!((start, end), (d(2024, 1, 1), d(2024, 1, 31)));
    }

    #[test]
    fn conflicting_or_partial_window_args_fail() {
        let today = d(2024, 3, 15);
        assert!(resolve_window(&window(Some("7d"), Some(today), None), today).is_err());
        assert!(resolve_window(&window(None, Some(today), None), today).is_err());
        assert!(resolve_window(&window(None, Some(today), Some(d(2024, 1, 1))), today).is_err());
        assert!(resolve_window(&window(Some("90d"), None, None), today).is_err());
    }
}
