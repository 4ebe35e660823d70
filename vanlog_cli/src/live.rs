use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use vanlog_directions::{
    mapbox::{MapboxClient, MapboxClientParams},
    overlay::LiveDirections,
};
use vanlog_route::{segment::SegmentBuilder, toll::TollTable};

pub fn segment_builder() -> anyhow::Result<SegmentBuilder> {
    let tolls = TollTable::from_env()?;
    Ok(SegmentBuilder::new(Default::default(), tolls))
}

pub fn mapbox_client(timeout: Option<Duration>) -> anyhow::Result<Option<MapboxClient>> {
    let Some(mut params) = MapboxClientParams::from_env() else {
        return Ok(None);
    };

    params.timeout = timeout;
    Ok(Some(MapboxClient::new(params)?))
}

pub fn live_directions(
    timeout: Option<Duration>,
) -> anyhow::Result<LiveDirections<MapboxClient>> {
    let client = mapbox_client(timeout)?;
    if client.is_none() {
        warn!("Mapbox token not configured, using estimates only");
    }

    Ok(LiveDirections::new(client, segment_builder()?))
}

/// Token cancelled on Ctrl-C, so pending lookups are dropped instead of
/// printed half done.
pub fn ctrl_c_token() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling lookups");
            cancel.cancel();
        }
    });

    token
}
