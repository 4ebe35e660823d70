use clap::{Parser, Subcommand};

use crate::{
    directions::{DirectionsArgs, GeocodeArgs},
    itinerary::{ReconcileArgs, SummaryArgs},
    segments::SegmentsArgs,
};

mod directions;
mod file_utils;
mod itinerary;
mod live;
mod parsers;
mod segments;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimated (or live) segments between consecutive stops
    #[command(visible_alias = "s")]
    Segments {
        #[command(flatten)]
        args: SegmentsArgs,
    },
    /// Reassigns dates after the stops were reordered
    Reconcile {
        #[command(flatten)]
        args: ReconcileArgs,
    },
    /// Days, nights and budget of an itinerary
    Summary {
        #[command(flatten)]
        args: SummaryArgs,
    },
    /// Driving distance and duration between two points
    Directions {
        #[command(flatten)]
        args: DirectionsArgs,
    },
    /// Looks up a French place by name
    Geocode {
        #[command(flatten)]
        args: GeocodeArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Segments { args }) => segments::run(args).await?,
        Some(Commands::Reconcile { args }) => itinerary::reconcile(args)?,
        Some(Commands::Summary { args }) => itinerary::summary(args)?,
        Some(Commands::Directions { args }) => directions::directions(args).await?,
        Some(Commands::Geocode { args }) => directions::geocode(args).await?,
        None => {}
    }

    Ok(())
}
