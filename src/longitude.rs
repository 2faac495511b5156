//! Longitudes wrapping around the antimeridian.
//!
//! Geographic inputs usually keep their longitudes in the range [-180, 180), so a line crossing
//! the antimeridian jumps from one end of the range to the other. These helpers make such jumps
//! continuous again and cut lines at a given meridian.

use num_traits::Float;

use crate::{
    Axis, ClipBoundary, Clipper, HalfPlane, Side, Tolerance,
    cartesian::{MultiPolyline, Point, Polyline},
    tolerance::scalar,
};

const HALF_TURN: f64 = 180.;
const FULL_TURN: f64 = 360.;

/// Returns the given longitude in the range [-180, 180).
pub fn normalize<T>(longitude: T) -> T
where
    T: Float,
{
    let half: T = scalar(HALF_TURN);
    let full: T = scalar(FULL_TURN);

    let mut wrapped = (longitude + half) % full;
    if wrapped < T::zero() {
        wrapped = wrapped + full;
    }

    wrapped - half
}

/// Returns the shortest signed angle to go from one longitude to the other.
pub fn delta<T>(from: T, to: T) -> T
where
    T: Float,
{
    normalize(to - from)
}

/// Shifts the longitude of every point, but the first one, so that no two consecutive points
/// are more than half a turn apart.
pub fn unwrap<T>(points: &mut [Point<T>])
where
    T: Float,
{
    for index in 1..points.len() {
        let previous = points[index - 1].x;
        points[index].x = previous + delta(previous, points[index].x);
    }
}

/// Splits the polyline at the given meridian, returning the parts west and east of it.
///
/// The polyline is unwrapped before being cut, so a line going from 170 to -170 is split at 180
/// into a western part ending at 180 and an eastern part starting at 180. The parts keep the
/// unwrapped longitudes.
pub fn split_polyline<T>(
    polyline: &Polyline<T>,
    meridian: T,
    tolerance: Tolerance<T>,
) -> (Option<MultiPolyline<T>>, Option<MultiPolyline<T>>)
where
    T: Float,
{
    let mut unwrapped = polyline.clone();
    unwrap(&mut unwrapped.vertices);

    let meridian = unwrapped
        .extent()
        .map(|extent| nearest_turn(meridian, extent.min_x, extent.max_x))
        .unwrap_or(meridian);

    let west: ClipBoundary<T> = HalfPlane::new(Axis::Longitude, meridian, Side::Near).into();
    let east: ClipBoundary<T> = HalfPlane::new(Axis::Longitude, meridian, Side::Far).into();

    let clip = |boundary: &ClipBoundary<T>| {
        Clipper::default()
            .with_boundary(boundary)
            .with_tolerance(tolerance)
            .polyline(&unwrapped)
    };

    (clip(&west), clip(&east))
}

/// Returns the meridian shifted by a whole turn if that brings it into the given range.
fn nearest_turn<T>(meridian: T, min: T, max: T) -> T
where
    T: Float,
{
    let full: T = scalar(FULL_TURN);
    [meridian, meridian - full, meridian + full]
        .into_iter()
        .find(|candidate| *candidate >= min && *candidate <= max)
        .unwrap_or(meridian)
}

#[cfg(test)]
mod tests {
    use crate::cartesian::{MultiPolyline, Point, Polyline};

    use super::{delta, normalize, split_polyline, unwrap};

    #[test]
    fn normalized_longitudes() {
        struct Test {
            name: &'static str,
            longitude: f64,
            want: f64,
        }

        vec![
            Test {
                name: "longitude in range",
                longitude: 45.,
                want: 45.,
            },
            Test {
                name: "antimeridian",
                longitude: 180.,
                want: -180.,
            },
            Test {
                name: "beyond the antimeridian",
                longitude: 190.,
                want: -170.,
            },
            Test {
                name: "before the antimeridian",
                longitude: -190.,
                want: 170.,
            },
            Test {
                name: "several turns",
                longitude: 765.,
                want: 45.,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = normalize(test.longitude);
            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn longitude_delta() {
        assert_eq!(delta(170., -170.), 20.);
        assert_eq!(delta(-170., 170.), -20.);
        assert_eq!(delta(10., 30.), 20.);
    }

    #[test]
    fn unwrapped_points() {
        let mut points: Vec<Point<f64>> = vec![
            [170., 0.].into(),
            [-170., 1.].into(),
            [-150., 2.].into(),
            [175., 3.].into(),
        ];

        unwrap(&mut points);

        let got: Vec<f64> = points.iter().map(|point| point.x).collect();
        assert_eq!(got, vec![170., 190., 210., 175.]);
    }

    #[test]
    fn polyline_split_at_the_antimeridian() {
        struct Test {
            name: &'static str,
            polyline: Polyline<f64>,
            meridian: f64,
            want: (Option<MultiPolyline<f64>>, Option<MultiPolyline<f64>>),
        }

        vec![
            Test {
                name: "line crossing the antimeridian eastward",
                polyline: vec![[170., 0.], [-170., 0.]].into(),
                meridian: 180.,
                want: (
                    Some(Polyline::from(vec![[170., 0.], [180., 0.]]).into()),
                    Some(Polyline::from(vec![[180., 0.], [190., 0.]]).into()),
                ),
            },
            Test {
                name: "line crossing the antimeridian westward",
                polyline: vec![[-170., 0.], [170., 0.]].into(),
                meridian: 180.,
                want: (
                    Some(Polyline::from(vec![[-180., 0.], [-190., 0.]]).into()),
                    Some(Polyline::from(vec![[-170., 0.], [-180., 0.]]).into()),
                ),
            },
            Test {
                name: "line away from the meridian",
                polyline: vec![[10., 0.], [20., 0.]].into(),
                meridian: 180.,
                want: (Some(Polyline::from(vec![[10., 0.], [20., 0.]]).into()), None),
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = split_polyline(&test.polyline, test.meridian, Default::default());
            assert_eq!(got, test.want, "{}", test.name);
        });
    }
}
