use futures::future::join_all;
use geo_types::LineString;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use vanlog_route::{
    segment::{RouteSegment, SegmentBuilder, SegmentMetrics},
    single_path::join_geometries,
    waypoint::Waypoint,
};

use crate::provider::DirectionsProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsSource {
    /// Confirmed by the directions service.
    Live,
    /// Local geometric estimate.
    Estimated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayMetrics {
    #[serde(flatten)]
    pub metrics: SegmentMetrics,
    pub source: MetricsSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSegment {
    #[serde(flatten)]
    pub segment: RouteSegment,
    pub source: MetricsSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRoute {
    pub segments: Vec<EnrichedSegment>,
    pub single_path: LineString,
}

/// Replaces estimated segment metrics with real driving directions when a
/// provider is available.
///
/// Lookups never fail: any provider error falls back to the estimate. A
/// lookup whose token is cancelled before the response arrives yields
/// `None` so a stale answer cannot overwrite a newer computation.
pub struct LiveDirections<P> {
    provider: Option<P>,
    builder: SegmentBuilder,
}

impl<P> LiveDirections<P>
where
    P: DirectionsProvider + Sync,
{
    pub fn new(provider: Option<P>, builder: SegmentBuilder) -> Self {
        Self { provider, builder }
    }

    /// Estimates only, for when no provider is configured.
    pub fn offline(builder: SegmentBuilder) -> Self {
        Self::new(None, builder)
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    pub fn builder(&self) -> &SegmentBuilder {
        &self.builder
    }

    /// Metrics for the leg between two stops, live when possible, otherwise
    /// the straight-line estimate. [`LiveDirections::enrich_segments`] falls
    /// back to the curved segment metrics instead.
    #[instrument(skip_all, fields(from = from.id(), to = to.id()))]
    pub async fn segment_metrics<W: Waypoint + Sync>(
        &self,
        from: &W,
        to: &W,
        cancel: &CancellationToken,
    ) -> Option<OverlayMetrics> {
        let estimate = self.builder.segment_info(from, to);

        let Some(provider) = &self.provider else {
            return Some(OverlayMetrics {
                metrics: estimate,
                source: MetricsSource::Estimated,
            });
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Directions lookup cancelled");
                return None;
            }
            result = provider.directions(from.point(), to.point(), false) => result,
        };

        let overlay = match result {
            Ok(route) => OverlayMetrics {
                metrics: SegmentMetrics {
                    distance_km: route.distance_km,
                    duration_min: route.duration_min,
                    toll_cost: estimate.toll_cost,
                },
                source: MetricsSource::Live,
            },
            Err(e) => {
                warn!("Directions lookup failed, keeping estimate: {}", e);
                OverlayMetrics {
                    metrics: estimate,
                    source: MetricsSource::Estimated,
                }
            }
        };

        Some(overlay)
    }

    async fn enrich_segment(
        &self,
        segment: RouteSegment,
        with_geometry: bool,
        cancel: &CancellationToken,
    ) -> Option<EnrichedSegment> {
        let estimated = |segment| EnrichedSegment {
            segment,
            source: MetricsSource::Estimated,
        };

        let (Some(provider), Some(from), Some(to)) =
            (&self.provider, segment.from_point(), segment.to_point())
        else {
            return Some(estimated(segment));
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return None,
            result = provider.directions(from, to, with_geometry) => result,
        };

        match result {
            Ok(route) => {
                let mut segment = segment;
                segment.distance_km = route.distance_km;
                segment.duration_min = route.duration_min;
                if let Some(geometry) = route.geometry {
                    segment.geometry = geometry;
                }

                Some(EnrichedSegment {
                    segment,
                    source: MetricsSource::Live,
                })
            }
            Err(e) => {
                warn!(
                    "Directions lookup for {} failed, keeping estimate: {}",
                    segment.segment_id, e
                );
                Some(estimated(segment))
            }
        }
    }

    /// Looks up every segment concurrently, each result only touching its
    /// own segment, then rebuilds the unified path. `None` when cancelled.
    #[instrument(skip_all, fields(segments = segments.len()))]
    pub async fn enrich_segments(
        &self,
        segments: Vec<RouteSegment>,
        with_geometry: bool,
        cancel: &CancellationToken,
    ) -> Option<EnrichedRoute> {
        let enriched = join_all(
            segments
                .into_iter()
                .map(|segment| self.enrich_segment(segment, with_geometry, cancel)),
        )
        .await
        .into_iter()
        .collect::<Option<Vec<_>>>()?;

        if cancel.is_cancelled() {
            return None;
        }

        let live = enriched
            .iter()
            .filter(|segment| segment.source == MetricsSource::Live)
            .count();
        debug!("{}/{} segments confirmed live", live, enriched.len());

        let single_path =
            join_geometries(enriched.iter().map(|enriched| &enriched.segment.geometry));

        Some(EnrichedRoute {
            segments: enriched,
            single_path,
        })
    }

    /// Builds the estimated segments for `stops` and enriches them.
    pub async fn route<W: Waypoint + Sync>(
        &self,
        stops: &[W],
        with_geometry: bool,
        cancel: &CancellationToken,
    ) -> Option<EnrichedRoute> {
        let segments = self.builder.build(stops);
        self.enrich_segments(segments, with_geometry, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use geo_types::Point;
    use vanlog_route::waypoint::RouteStop;

    use super::*;
    use crate::{error::MapboxError, provider::DirectionsRoute};

    struct FixedProvider;

    impl DirectionsProvider for FixedProvider {
        async fn directions(
            &self,
            _from: Point,
            _to: Point,
            _with_geometry: bool,
        ) -> Result<DirectionsRoute, MapboxError> {
            Ok(DirectionsRoute::from_raw(584_321.0, 20_130.0, None))
        }
    }

    struct FailingProvider;

    impl DirectionsProvider for FailingProvider {
        async fn directions(
            &self,
            _from: Point,
            _to: Point,
            _with_geometry: bool,
        ) -> Result<DirectionsRoute, MapboxError> {
            Err(MapboxError::NoRoute("NoRoute".into()))
        }
    }

    struct SlowProvider;

    impl DirectionsProvider for SlowProvider {
        async fn directions(
            &self,
            _from: Point,
            _to: Point,
            _with_geometry: bool,
        ) -> Result<DirectionsRoute, MapboxError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(DirectionsRoute::from_raw(1.0, 1.0, None))
        }
    }

    fn paris() -> RouteStop {
        RouteStop::new("paris", "Paris", 48.8566, 2.3522)
    }

    fn bordeaux() -> RouteStop {
        RouteStop::new("bordeaux", "Bordeaux", 44.8378, -0.5792)
    }

    #[tokio::test]
    async fn test_live_metrics_keep_toll() {
        let overlay = LiveDirections::new(Some(FixedProvider), SegmentBuilder::default());

        let metrics = overlay
            .segment_metrics(&paris(), &bordeaux(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(metrics.source, MetricsSource::Live);
        assert_eq!(metrics.metrics.distance_km, 584.3);
        assert_eq!(metrics.metrics.duration_min, 336);
        assert_eq!(metrics.metrics.toll_cost, 45.2);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_estimate() {
        let overlay = LiveDirections::new(Some(FailingProvider), SegmentBuilder::default());
        let estimate = overlay.builder().segment_info(&paris(), &bordeaux());

        let metrics = overlay
            .segment_metrics(&paris(), &bordeaux(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(metrics.source, MetricsSource::Estimated);
        assert_eq!(metrics.metrics, estimate);
    }

    #[tokio::test]
    async fn test_not_configured_is_estimated() {
        let overlay = LiveDirections::<FixedProvider>::offline(SegmentBuilder::default());

        let metrics = overlay
            .segment_metrics(&paris(), &bordeaux(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(!overlay.is_configured());
        assert_eq!(metrics.source, MetricsSource::Estimated);
    }

    #[tokio::test]
    async fn test_cancelled_lookup_is_discarded() {
        let overlay = LiveDirections::new(Some(SlowProvider), SegmentBuilder::default());
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let metrics = overlay
            .segment_metrics(&paris(), &bordeaux(), &cancel)
            .await;

        assert_eq!(metrics, None);
    }
}
