use std::{path::PathBuf, time::Duration};

use clap::Args;
use comfy_table::Table;
use serde_json::json;
use vanlog_directions::overlay::{EnrichedSegment, LiveDirections, MetricsSource};
use vanlog_route::summary::RouteSummary;

use crate::{
    file_utils::{read_itinerary, write_json},
    live, parsers,
};

#[derive(Args)]
pub struct SegmentsArgs {
    /// Itinerary file, a JSON array of stops
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Confirm distances and durations with Mapbox directions
    #[arg(long)]
    live: bool,

    /// Print the segments and the single line as GeoJSON
    #[arg(long)]
    geojson: bool,

    /// Print the segments as JSON instead of a table
    #[arg(long, conflicts_with = "geojson")]
    json: bool,

    /// Timeout of each directions request (e.g., "10s", "PT1M")
    #[arg(long, value_parser = parsers::parse_timeout)]
    timeout: Option<Duration>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn print_table(segments: &[EnrichedSegment], summary: &RouteSummary) {
    let mut table = Table::new();
    table.set_header(vec!["From", "To", "Distance (km)", "Duration", "Toll (€)", "Source"]);

    for enriched in segments {
        let segment = &enriched.segment;
        table.add_row(vec![
            segment.from_name.clone(),
            segment.to_name.clone(),
            format!("{:.1}", segment.distance_km),
            format!("{}h{:02}", segment.duration_min / 60, segment.duration_min % 60),
            format!("{:.1}", segment.toll_cost),
            match enriched.source {
                MetricsSource::Live => "live".to_string(),
                MetricsSource::Estimated => "estimated".to_string(),
            },
        ]);
    }

    let (hours, minutes) = summary.total_hours_and_minutes();
    table.add_row(vec![
        "Total".to_string(),
        format!("{} segments", summary.segment_count),
        format!("{:.1}", summary.total_distance_km),
        format!("{hours}h{minutes:02}"),
        format!("{:.1}", summary.total_toll_cost),
        String::new(),
    ]);

    println!("{table}");
}

pub async fn run(args: SegmentsArgs) -> anyhow::Result<()> {
    let itinerary = read_itinerary(&args.input)?;

    let overlay = if args.live {
        live::live_directions(args.timeout)?
    } else {
        LiveDirections::offline(live::segment_builder()?)
    };

    let cancel = live::ctrl_c_token();
    let Some(route) = overlay
        .route(itinerary.stops(), args.geojson, &cancel)
        .await
    else {
        anyhow::bail!("Cancelled");
    };

    let summary = RouteSummary::from_metrics(
        route
            .segments
            .iter()
            .map(|enriched| enriched.segment.metrics()),
    );

    if args.geojson {
        let (segments, single_line) = route.feature_collections();
        write_json(
            &json!({ "segments": segments, "singleLine": single_line }),
            args.out.as_deref(),
        )
    } else if args.json {
        write_json(
            &json!({ "segments": route.segments, "summary": summary }),
            args.out.as_deref(),
        )
    } else {
        print_table(&route.segments, &summary);
        Ok(())
    }
}
