use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};

use crate::segment::RouteSegment;

fn segment_properties(segment: &RouteSegment) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert("segmentId".into(), segment.segment_id.clone().into());
    properties.insert("fromId".into(), segment.from_id.clone().into());
    properties.insert("toId".into(), segment.to_id.clone().into());
    properties.insert("fromName".into(), segment.from_name.clone().into());
    properties.insert("toName".into(), segment.to_name.clone().into());
    properties.insert("distanceKm".into(), segment.distance_km.into());
    properties.insert("durationMin".into(), segment.duration_min.into());
    properties.insert("tollCost".into(), segment.toll_cost.into());
    properties
}

pub fn segment_feature(segment: &RouteSegment) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&segment.geometry))),
        id: Some(Id::String(format!("segment-{}", segment.segment_id))),
        properties: Some(segment_properties(segment)),
        foreign_members: None,
    }
}

pub fn segments_feature_collection(segments: &[RouteSegment]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: segments.iter().map(segment_feature).collect(),
        foreign_members: None,
    }
}

/// Empty collection when the path has nothing to draw.
pub fn single_path_feature_collection(path: &LineString) -> FeatureCollection {
    let features = if path.0.len() < 2 {
        Vec::new()
    } else {
        vec![Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::from(path))),
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        }]
    };

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
