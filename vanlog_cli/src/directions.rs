use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Args;
use tracing::info;
use vanlog_directions::mapbox::MapboxClient;
use vanlog_itinerary::itinerary::NewStop;
use vanlog_route::waypoint::{LatLng, RouteStop};

use crate::{
    file_utils::{read_itinerary, write_json},
    live, parsers,
};

#[derive(Args)]
pub struct DirectionsArgs {
    /// Start as "lat,lng"
    #[arg(long, value_parser = parsers::parse_lat_lng, allow_hyphen_values = true)]
    from: LatLng,

    /// Destination as "lat,lng"
    #[arg(long, value_parser = parsers::parse_lat_lng, allow_hyphen_values = true)]
    to: LatLng,

    #[arg(long, value_parser = parsers::parse_timeout)]
    timeout: Option<Duration>,
}

#[derive(Args)]
pub struct GeocodeArgs {
    /// Place to look up, searched in France
    query: String,

    /// Append the place found to this itinerary file
    #[arg(long)]
    add_to: Option<PathBuf>,

    /// Arrival date of the added stop (YYYY-MM-DD)
    #[arg(long, requires = "add_to")]
    arrival: Option<jiff::civil::Date>,
}

pub async fn directions(args: DirectionsArgs) -> anyhow::Result<()> {
    let overlay = live::live_directions(args.timeout)?;
    let cancel = live::ctrl_c_token();

    let from = RouteStop::new("from", "from", args.from.lat, args.from.lng);
    let to = RouteStop::new("to", "to", args.to.lat, args.to.lng);

    let metrics = overlay
        .segment_metrics(&from, &to, &cancel)
        .await
        .context("Cancelled")?;

    write_json(&metrics, None)
}

pub async fn geocode(args: GeocodeArgs) -> anyhow::Result<()> {
    let client = MapboxClient::from_env()?;
    let result = client
        .geocode(&args.query)
        .await?
        .with_context(|| format!("No place found for {:?}", args.query))?;

    let Some(path) = args.add_to else {
        return write_json(&result, None);
    };

    let itinerary = read_itinerary(&path)?.add_stop(NewStop {
        name: result.name.clone(),
        lat: result.lat,
        lng: result.lng,
        arrival_date: args.arrival,
    });
    info!("Added {} to {}", result.name, path.display());

    write_json(&itinerary, Some(&path))
}
