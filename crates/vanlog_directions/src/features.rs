use geojson::FeatureCollection;
use vanlog_route::features::{segment_feature, single_path_feature_collection};

use crate::overlay::{EnrichedRoute, EnrichedSegment, MetricsSource};

/// Segment features carrying a `source` property, `live` or `estimated`, so
/// maps can style unconfirmed legs differently.
pub fn enriched_segments_feature_collection(segments: &[EnrichedSegment]) -> FeatureCollection {
    let features = segments
        .iter()
        .map(|enriched| {
            let mut feature = segment_feature(&enriched.segment);
            let source = match enriched.source {
                MetricsSource::Live => "live",
                MetricsSource::Estimated => "estimated",
            };
            feature.set_property("source", source);
            feature
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

impl EnrichedRoute {
    /// `(segments, single line)` feature collections.
    pub fn feature_collections(&self) -> (FeatureCollection, FeatureCollection) {
        (
            enriched_segments_feature_collection(&self.segments),
            single_path_feature_collection(&self.single_path),
        )
    }
}
