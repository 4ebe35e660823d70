use geo::LineString;

use crate::segment::RouteSegment;

/// Joins consecutive geometries into one path, dropping the first vertex of
/// every geometry after the first since it repeats the previous end point.
///
/// Animating a single path keeps a constant apparent speed over the whole
/// trip, which per-segment animations cannot do when segment lengths differ.
pub fn join_geometries<'a, I>(geometries: I) -> LineString
where
    I: IntoIterator<Item = &'a LineString>,
{
    let mut coords = Vec::new();

    for (i, geometry) in geometries.into_iter().enumerate() {
        let skip = if i == 0 { 0 } else { 1 };
        coords.extend(geometry.0.iter().skip(skip).copied());
    }

    if coords.len() < 2 {
        return LineString::new(Vec::new());
    }

    LineString::new(coords)
}

pub fn build_single_path(segments: &[RouteSegment]) -> LineString {
    join_geometries(segments.iter().map(|segment| &segment.geometry))
}

#[cfg(test)]
mod tests {
    use geo::{coord, line_string};

    use super::*;
    use crate::{segment::SegmentBuilder, waypoint::RouteStop};

    #[test]
    fn test_shared_endpoint_is_removed() {
        let stops = vec![
            RouteStop::new("paris", "Paris", 48.8566, 2.3522),
            RouteStop::new("bordeaux", "Bordeaux", 44.8378, -0.5792),
            RouteStop::new("biarritz", "Biarritz", 43.4832, -1.5586),
        ];
        let segments = SegmentBuilder::default().build(&stops);
        let path = build_single_path(&segments);

        assert_eq!(
            path.0.len(),
            segments[0].geometry.0.len() + segments[1].geometry.0.len() - 1
        );
        assert_eq!(path.0.first(), segments[0].geometry.0.first());
        assert_eq!(path.0.last(), segments[1].geometry.0.last());
    }

    #[test]
    fn test_empty_when_no_segments() {
        assert!(build_single_path(&[]).0.is_empty());
    }

    #[test]
    fn test_empty_when_single_point() {
        let single = line_string![(x: 1.0, y: 2.0)];
        assert!(join_geometries([&single]).0.is_empty());
    }

    #[test]
    fn test_join_raw_geometries() {
        let a = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let b = line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 1.0), (x: 3.0, y: 1.0)];

        let joined = join_geometries([&a, &b]);
        assert_eq!(
            joined.0,
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 1.0, y: 0.0 },
                coord! { x: 2.0, y: 1.0 },
                coord! { x: 3.0, y: 1.0 },
            ]
        );
    }
}
