use geo::{Coord, LineString};

/// Time step used when sampling the spline.
const STEP: u32 = 10;

/// Piecewise cubic Bezier spline passing through every input point.
///
/// The curve is parameterised on a `0..duration` time axis; each input edge
/// gets an equal share of it. Inner control points are pulled towards the
/// midpoints of the neighbouring edges according to `sharpness`.
pub struct BezierSpline {
    points: Vec<Coord>,
    controls: Vec<(Coord, Coord)>,
    duration: u32,
}

impl BezierSpline {
    pub fn new(points: Vec<Coord>, duration: u32, sharpness: f64) -> Self {
        let mut controls = Vec::with_capacity(points.len());

        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            let centers = points
                .windows(2)
                .map(|pair| (pair[0] + pair[1]) / 2.0)
                .collect::<Vec<_>>();

            controls.push((first, first));
            for (i, pair) in centers.windows(2).enumerate() {
                let point = points[i + 1];
                let offset = point - (pair[0] + pair[1]) / 2.0;

                controls.push((
                    point * (1.0 - sharpness) + (pair[0] + offset) * sharpness,
                    point * (1.0 - sharpness) + (pair[1] + offset) * sharpness,
                ));
            }
            controls.push((last, last));
        }

        Self {
            points,
            controls,
            duration: duration.max(1),
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Position on the curve at `time`, clamped to the spline duration.
    pub fn position(&self, time: u32) -> Coord {
        let last = self.points.len().saturating_sub(1);
        if last == 0 {
            return self.points.first().copied().unwrap_or(Coord { x: 0.0, y: 0.0 });
        }

        let t = time.min(self.duration) as f64 / self.duration as f64;
        if t >= 1.0 {
            return self.points[last];
        }

        let scaled = last as f64 * t;
        let n = scaled.floor() as usize;
        let local = scaled - n as f64;

        cubic_bezier(
            local,
            self.points[n],
            self.controls[n].1,
            self.controls[n + 1].0,
            self.points[n + 1],
        )
    }
}

fn cubic_bezier(t: f64, p1: Coord, c1: Coord, c2: Coord, p2: Coord) -> Coord {
    let t2 = t * t;
    let t3 = t2 * t;
    let u = 1.0 - t;

    let b0 = t3;
    let b1 = 3.0 * t2 * u;
    let b2 = 3.0 * t * u * u;
    let b3 = u * u * u;

    Coord {
        x: p2.x * b0 + c2.x * b1 + c1.x * b2 + p1.x * b3,
        y: p2.y * b0 + c2.y * b1 + c1.y * b2 + p1.y * b3,
    }
}

/// Smooths `line` into a curve through all of its vertices.
///
/// Samples are taken every 10 time units, keeping every other block of 100,
/// and the exact end point is always appended, so the output starts and ends
/// on the input's first and last coordinates.
pub fn bezier_spline(line: &LineString, resolution: u32, sharpness: f64) -> LineString {
    if line.0.len() < 2 {
        return line.clone();
    }

    let spline = BezierSpline::new(line.0.clone(), resolution, sharpness);
    let mut coords = Vec::with_capacity((spline.duration() / (2 * STEP)) as usize + 1);

    let mut time = 0;
    while time < spline.duration() {
        if (time / 100) % 2 == 0 {
            coords.push(spline.position(time));
        }
        time += STEP;
    }

    let end = spline.position(spline.duration());
    if coords.last() != Some(&end) {
        coords.push(end);
    }

    LineString::new(coords)
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;

    fn arc() -> LineString {
        LineString::new(vec![
            coord! { x: 2.3522, y: 48.8566 },
            coord! { x: 1.2, y: 47.1 },
            coord! { x: -0.5792, y: 44.8378 },
        ])
    }

    #[test]
    fn test_endpoints_are_exact() {
        let input = arc();
        let curve = bezier_spline(&input, 10_000, 0.85);

        assert_eq!(curve.0.first(), input.0.first());
        assert_eq!(curve.0.last(), input.0.last());
    }

    #[test]
    fn test_endpoints_are_exact_for_any_resolution() {
        let input = arc();

        for resolution in [150, 1_010, 10_100, 9_999] {
            let curve = bezier_spline(&input, resolution, 0.85);

            assert_eq!(curve.0.first(), input.0.first());
            assert_eq!(curve.0.last(), input.0.last());
        }
    }

    #[test]
    fn test_sample_count() {
        let curve = bezier_spline(&arc(), 10_000, 0.85);
        assert_eq!(curve.0.len(), 501);
    }

    #[test]
    fn test_passes_through_inner_point() {
        let input = arc();
        let spline = BezierSpline::new(input.0.clone(), 10_000, 0.85);

        assert_eq!(spline.position(5_000), input.0[1]);
    }

    #[test]
    fn test_straight_input_stays_straight() {
        let input = LineString::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 2.0 },
        ]);

        for coord in bezier_spline(&input, 10_000, 0.85).coords() {
            assert!((coord.x - coord.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_point() {
        let input = LineString::new(vec![coord! { x: 3.0, y: 4.0 }]);
        assert_eq!(bezier_spline(&input, 10_000, 0.85), input);

        let spline = BezierSpline::new(input.0.clone(), 10_000, 0.85);
        assert_eq!(spline.position(4_000), coord! { x: 3.0, y: 4.0 });
    }
}
