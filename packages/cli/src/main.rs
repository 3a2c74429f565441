#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal dashboard for the citizen complaints dataset.
//!
//! Renders the same three views the web dashboard shows: the summary
//! counters over the full dataset, the filtered complaints table, and
//! the derived map center with one marker line per geolocated result.
//! All mutable interaction state (query text, status pick, selected
//! record) lives here; the query engine stays pure.

mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use complaint_map_complaint_models::{ComplaintRecord, ComplaintStatus};
use complaint_map_query::{ComplaintQuery, compute_aggregates, compute_map_center, filter};

#[derive(Parser)]
#[command(name = "complaint-map", about = "Citizen complaints dashboard")]
struct Cli {
    /// Path to a complaints JSON export. Defaults to the bundled dataset.
    #[arg(long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard: counters, filtered table, map center
    Show {
        /// Free-text search over address and status (substring,
        /// case-insensitive)
        #[arg(long)]
        query: Option<String>,
        /// Keep only complaints with this exact status
        /// (e.g. "В работе", "Решено", "Отклонено")
        #[arg(long)]
        status: Option<String>,
        /// Emit a machine-readable JSON report instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Print every field of a single complaint
    Details {
        /// Complaint id
        id: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let records = match &cli.data {
        Some(path) => complaint_map_dataset::load_from_path(path)?,
        None => complaint_map_dataset::bundled()?,
    };

    match cli.command {
        None => show(&records, None, None, false)?,
        Some(Commands::Show {
            query,
            status,
            json,
        }) => show(&records, query, status, json)?,
        Some(Commands::Details { id }) => details(&records, id),
    }

    Ok(())
}

fn show(
    records: &[ComplaintRecord],
    query_text: Option<String>,
    status_label: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // The --status picker is a closed list, so unknown labels are an
    // input error here even though the dataset itself tolerates them.
    let status = status_label
        .as_deref()
        .map(ComplaintStatus::parse_recognized)
        .transpose()?;

    let query = ComplaintQuery::new(query_text.unwrap_or_default(), status);

    let aggregates = compute_aggregates(records);
    let filtered = filter(records, &query);
    let center = compute_map_center(filtered.iter().copied());

    log::debug!(
        "Query matched {} of {} complaints",
        filtered.len(),
        records.len()
    );

    if json {
        render::json_report(&aggregates, &filtered, records.len(), center)?;
    } else {
        render::dashboard(&aggregates, &filtered, records.len(), center);
    }

    Ok(())
}

fn details(records: &[ComplaintRecord], id: u64) {
    // Detail lookup is by row key, independent of any active filter.
    match records.iter().find(|record| record.id == id) {
        Some(record) => render::details(record),
        None => println!("Обращение #{id} не найдено"),
    }
}
