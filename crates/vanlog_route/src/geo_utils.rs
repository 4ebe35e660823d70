use geo::{Bearing, Destination, Distance, Haversine, InterpolatePoint, LineString, Point};

use crate::units::Kilometers;

/// Points are stored lon/lat (x/y) the way GeoJSON expects them.
pub fn point(lat: f64, lng: f64) -> Point {
    Point::new(lng, lat)
}

pub fn line(points: &[Point]) -> LineString {
    points.iter().map(|point| point.0).collect()
}

/// Initial great-circle bearing in degrees.
pub fn bearing(from: Point, to: Point) -> f64 {
    Haversine.bearing(from, to)
}

pub fn distance(from: Point, to: Point) -> Kilometers {
    Kilometers::from_meters(Haversine.distance(from, to))
}

pub fn midpoint(from: Point, to: Point) -> Point {
    if from == to {
        return from;
    }

    Haversine.point_at_ratio_between(from, to, 0.5)
}

pub fn destination(origin: Point, bearing: f64, distance: Kilometers) -> Point {
    Haversine.destination(origin, bearing, distance.value() * 1000.0)
}

/// Great-circle length summed over every vertex pair.
pub fn line_length(line: &LineString) -> Kilometers {
    line.lines()
        .map(|segment| distance(segment.start_point(), segment.end_point()))
        .sum()
}
