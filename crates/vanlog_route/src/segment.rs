use geo::{LineString, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    bezier_spline::bezier_spline,
    geo_utils,
    toll::{TollTable, toll_key},
    units::{Kilometers, Kmh, round_to_tenth},
    waypoint::Waypoint,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentParams {
    /// Perpendicular offset of the curve control point, as a fraction of the
    /// straight-line distance.
    pub sharpness: f64,
    /// Upper bound of that offset.
    pub max_offset_km: f64,
    pub spline_sharpness: f64,
    pub spline_resolution: u32,
    pub average_speed: Kmh,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            sharpness: 0.5,
            max_offset_km: 80.0,
            spline_sharpness: 0.85,
            spline_resolution: 10_000,
            average_speed: Kmh::new(85.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMetrics {
    pub distance_km: f64,
    pub duration_min: i64,
    pub toll_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub segment_id: String,
    pub from_id: String,
    pub to_id: String,
    pub from_name: String,
    pub to_name: String,
    pub distance_km: f64,
    pub duration_min: i64,
    pub toll_cost: f64,
    pub geometry: LineString,
}

impl RouteSegment {
    pub fn metrics(&self) -> SegmentMetrics {
        SegmentMetrics {
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            toll_cost: self.toll_cost,
        }
    }

    pub fn from_point(&self) -> Option<Point> {
        self.geometry.0.first().map(|coord| Point::from(*coord))
    }

    pub fn to_point(&self) -> Option<Point> {
        self.geometry.0.last().map(|coord| Point::from(*coord))
    }
}

/// Control point of the arc drawn between `from` and `to`: the midpoint pushed
/// sideways (bearing + 90°) by a distance proportional to the gap, capped.
pub fn curve_control_point(from: Point, to: Point, params: &SegmentParams) -> Point {
    let mid = geo_utils::midpoint(from, to);
    let bearing = geo_utils::bearing(from, to);
    let distance = geo_utils::distance(from, to);
    let offset = (distance.value() * params.sharpness).min(params.max_offset_km);

    geo_utils::destination(mid, bearing + 90.0, Kilometers::new(offset))
}

pub fn curved_line_between(from: Point, to: Point, params: &SegmentParams) -> LineString {
    let control = curve_control_point(from, to, params);

    bezier_spline(
        &geo_utils::line(&[from, control, to]),
        params.spline_resolution,
        params.spline_sharpness,
    )
}

/// Turns an ordered list of stops into estimated segments.
pub struct SegmentBuilder {
    params: SegmentParams,
    tolls: TollTable,
}

impl Default for SegmentBuilder {
    fn default() -> Self {
        Self::new(SegmentParams::default(), TollTable::builtin())
    }
}

impl SegmentBuilder {
    pub fn new(params: SegmentParams, tolls: TollTable) -> Self {
        Self { params, tolls }
    }

    pub fn params(&self) -> &SegmentParams {
        &self.params
    }

    pub fn tolls(&self) -> &TollTable {
        &self.tolls
    }

    pub fn estimate_duration(&self, distance: Kilometers) -> i64 {
        self.params.average_speed.travel_minutes(distance)
    }

    /// One curved segment per adjacent pair, in itinerary order.
    pub fn build<W: Waypoint>(&self, stops: &[W]) -> Vec<RouteSegment> {
        let segments = stops
            .windows(2)
            .map(|pair| self.build_segment(&pair[0], &pair[1]))
            .collect::<Vec<_>>();

        debug!(
            "Built {} segments for {} stops",
            segments.len(),
            stops.len()
        );

        segments
    }

    pub fn build_segment<W: Waypoint>(&self, from: &W, to: &W) -> RouteSegment {
        let geometry = curved_line_between(from.point(), to.point(), &self.params);
        let distance = geo_utils::line_length(&geometry);

        RouteSegment {
            segment_id: toll_key(from.id(), to.id()),
            from_id: from.id().to_owned(),
            to_id: to.id().to_owned(),
            from_name: from.name().to_owned(),
            to_name: to.name().to_owned(),
            distance_km: distance.rounded(),
            duration_min: self.estimate_duration(distance),
            toll_cost: round_to_tenth(self.tolls.get(from.id(), to.id())),
            geometry,
        }
    }

    /// Straight-line estimate between two stops, without building a curve.
    pub fn segment_info<W: Waypoint>(&self, from: &W, to: &W) -> SegmentMetrics {
        let distance = geo_utils::distance(from.point(), to.point());

        SegmentMetrics {
            distance_km: distance.rounded(),
            duration_min: self.estimate_duration(distance),
            toll_cost: round_to_tenth(self.tolls.get(from.id(), to.id())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::RouteStop;

    fn stops() -> Vec<RouteStop> {
        vec![
            RouteStop::new("paris", "Paris", 48.8566, 2.3522),
            RouteStop::new("bordeaux", "Bordeaux", 44.8378, -0.5792),
            RouteStop::new("biarritz", "Biarritz", 43.4832, -1.5586),
        ]
    }

    #[test]
    fn test_segment_count() {
        let builder = SegmentBuilder::default();
        let stops = stops();

        assert!(builder.build::<RouteStop>(&[]).is_empty());
        assert!(builder.build(&stops[..1]).is_empty());
        assert_eq!(builder.build(&stops[..2]).len(), 1);
        assert_eq!(builder.build(&stops).len(), 2);
    }

    #[test]
    fn test_segment_order_and_identity() {
        let segments = SegmentBuilder::default().build(&stops());

        assert_eq!(segments[0].segment_id, "paris-bordeaux");
        assert_eq!(segments[0].from_name, "Paris");
        assert_eq!(segments[0].to_name, "Bordeaux");
        assert_eq!(segments[1].from_id, "bordeaux");
        assert_eq!(segments[1].to_id, "biarritz");
    }

    #[test]
    fn test_segment_tolls() {
        let segments = SegmentBuilder::default().build(&stops());

        assert_eq!(segments[0].toll_cost, 45.2);
        assert_eq!(segments[1].toll_cost, 18.9);

        let reversed = SegmentBuilder::default().build(&[stops()[1].clone(), stops()[0].clone()]);
        assert_eq!(reversed[0].toll_cost, 0.0);
    }

    #[test]
    fn test_curve_endpoints_match_stops() {
        let stops = stops();
        let segments = SegmentBuilder::default().build(&stops);

        for (segment, pair) in segments.iter().zip(stops.windows(2)) {
            assert_eq!(segment.from_point(), Some(pair[0].point()));
            assert_eq!(segment.to_point(), Some(pair[1].point()));
        }
    }

    #[test]
    fn test_curve_is_longer_than_straight_line() {
        let builder = SegmentBuilder::default();
        let stops = stops();

        let curved = builder.build_segment(&stops[0], &stops[1]);
        let straight = builder.segment_info(&stops[0], &stops[1]);

        assert!(curved.distance_km > straight.distance_km);
        assert!(curved.duration_min >= straight.duration_min);
    }

    #[test]
    fn test_control_point_offset_is_capped() {
        let params = SegmentParams::default();
        let stops = stops();
        let (from, to) = (stops[0].point(), stops[2].point());

        let control = curve_control_point(from, to, &params);
        let offset = geo_utils::distance(geo_utils::midpoint(from, to), control).value();

        assert!((offset - 80.0).abs() < 0.01, "offset {offset}");
    }

    #[test]
    fn test_control_point_offset_for_short_hop() {
        let params = SegmentParams::default();
        let from = geo_utils::point(45.0, 0.0);
        let to = geo_utils::point(45.0, 0.2);

        let gap = geo_utils::distance(from, to).value();
        let control = curve_control_point(from, to, &params);
        let offset = geo_utils::distance(geo_utils::midpoint(from, to), control).value();

        assert!((offset - gap * 0.5).abs() < 0.01);
    }

    #[test]
    fn test_duration_follows_distance() {
        let builder = SegmentBuilder::default();

        assert_eq!(builder.estimate_duration(Kilometers::new(170.0)), 120);

        for segment in builder.build(&stops()) {
            let expected = (segment.distance_km / 85.0 * 60.0).round() as i64;
            assert!((segment.duration_min - expected).abs() <= 1);
        }
    }

    #[test]
    fn test_identical_stops() {
        let stop = RouteStop::new("a", "A", 45.0, 1.0);
        let segments = SegmentBuilder::default().build(&[stop.clone(), stop]);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].distance_km, 0.0);
        assert_eq!(segments[0].duration_min, 0);
    }
}
