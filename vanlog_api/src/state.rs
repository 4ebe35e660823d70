use tokio_util::sync::CancellationToken;
use vanlog_directions::{
    error::MapboxError,
    mapbox::{MapboxClient, MapboxClientParams},
    overlay::LiveDirections,
};
use vanlog_route::{segment::SegmentBuilder, toll::TollTable};

pub struct AppState {
    pub live: LiveDirections<MapboxClient>,
    /// Cancelled when the server starts shutting down, aborting pending
    /// directions lookups.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn from_env() -> anyhow::Result<Self> {
        let tolls = TollTable::from_env()?;
        let client = MapboxClientParams::from_env()
            .map(MapboxClient::new)
            .transpose()?;

        Ok(Self {
            live: LiveDirections::new(client, SegmentBuilder::new(Default::default(), tolls)),
            shutdown: CancellationToken::new(),
        })
    }

    pub fn mapbox(&self) -> Result<&MapboxClient, MapboxError> {
        self.live.provider().ok_or(MapboxError::NotConfigured)
    }
}
