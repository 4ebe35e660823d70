use std::path::PathBuf;

use clap::Args;
use comfy_table::Table;
use tracing::info;
use vanlog_itinerary::{calendar, itinerary::Itinerary};

use crate::file_utils::{read_itinerary, write_json};

#[derive(Args)]
pub struct ReconcileArgs {
    /// Itinerary file, a JSON array of stops in travel order
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn reconcile(args: ReconcileArgs) -> anyhow::Result<()> {
    let itinerary = read_itinerary(&args.input)?;
    let reconciled = itinerary.reconciled();

    let changed = itinerary
        .stops()
        .iter()
        .zip(reconciled.stops())
        .filter(|(before, after)| before != after)
        .count();
    info!("{} of {} stops changed", changed, reconciled.len());

    write_json(&reconciled, args.out.as_deref())
}

fn format_date(date: Option<jiff::civil::Date>) -> String {
    date.map(|date| date.to_string()).unwrap_or_else(|| "—".into())
}

fn print_table(itinerary: &Itinerary) {
    let first = itinerary.first_date();

    let mut table = Table::new();
    table.set_header(vec![
        "#", "Day", "Stop", "Night", "Arrival", "Departure", "Nights", "Budget (€)",
    ]);

    for stop in itinerary.stops() {
        table.add_row(vec![
            (stop.order + 1).to_string(),
            calendar::day_label(stop.arrival_date, first),
            stop.name.clone(),
            stop.night_type.to_string(),
            format_date(stop.arrival_date),
            format_date(stop.departure_date),
            stop.nights().to_string(),
            stop.planned_budget().to_string(),
        ]);
    }

    let summary = itinerary.summary();
    table.add_row(vec![
        String::new(),
        format!("{} days", summary.trip_days),
        format!("{} stops", summary.stop_count),
        format!("{} overnight", summary.overnight_count),
        format_date(summary.first_date),
        format_date(summary.last_date),
        summary.total_nights.to_string(),
        summary.total_budget.to_string(),
    ]);

    println!("{table}");
}

pub fn summary(args: SummaryArgs) -> anyhow::Result<()> {
    let itinerary = read_itinerary(&args.input)?;

    if args.json {
        write_json(&itinerary.summary(), None)
    } else {
        print_table(&itinerary);
        Ok(())
    }
}
