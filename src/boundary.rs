use std::cmp::Ordering;

use num_traits::Float;

use crate::{
    Shape, Tolerance,
    cartesian::{Extent, Point, Ring, Segment},
    tolerance::scalar,
};

/// The coordinate a [`HalfPlane`] cuts along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The cut line is vertical, at a fixed `x`.
    Longitude,
    /// The cut line is horizontal, at a fixed `y`.
    Latitude,
}

/// The side of a cut line that is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Keeps the coordinates less than or equal to the cut value.
    Near,
    /// Keeps the coordinates greater than or equal to the cut value.
    Far,
}

/// A corner of a rectangular boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectCorner {
    LeftBottom,
    LeftTop,
    RightTop,
    RightBottom,
}

impl RectCorner {
    /// All the corners in the clockwise order a rectangle is walked.
    pub const ALL: [Self; 4] = [
        Self::LeftBottom,
        Self::LeftTop,
        Self::RightTop,
        Self::RightBottom,
    ];
}

/// One side of a fixed longitude or latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane<T = f64> {
    pub axis: Axis,
    pub value: T,
    pub keep: Side,
}

impl<T> HalfPlane<T>
where
    T: Float,
{
    /// How far the half-plane reaches along longitudes, at least.
    const LONGITUDE_REACH: f64 = 370.;
    /// How far the half-plane reaches along latitudes, at least.
    const LATITUDE_REACH: f64 = 100.;

    pub fn new(axis: Axis, value: T, keep: Side) -> Self {
        Self { axis, value, keep }
    }

    fn coordinate(&self, point: &Point<T>) -> T {
        match self.axis {
            Axis::Longitude => point.x,
            Axis::Latitude => point.y,
        }
    }

    /// Returns the lowest and highest value of the extent along the cut axis.
    fn range(&self, extent: &Extent<T>) -> (T, T) {
        match self.axis {
            Axis::Longitude => (extent.min_x, extent.max_x),
            Axis::Latitude => (extent.min_y, extent.max_y),
        }
    }

    pub fn contains(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        let coordinate = self.coordinate(point);
        match self.keep {
            Side::Near => coordinate <= self.value + tolerance.epsilon(),
            Side::Far => coordinate >= self.value - tolerance.epsilon(),
        }
    }

    fn extent_overlaps(&self, extent: &Extent<T>, tolerance: &Tolerance<T>) -> bool {
        let (min, max) = self.range(extent);
        match self.keep {
            Side::Near => min <= self.value + tolerance.epsilon(),
            Side::Far => max >= self.value - tolerance.epsilon(),
        }
    }

    fn is_extent_fully_inside(&self, extent: &Extent<T>, tolerance: &Tolerance<T>) -> bool {
        let (min, max) = self.range(extent);
        match self.keep {
            Side::Near => max <= self.value + tolerance.epsilon(),
            Side::Far => min >= self.value - tolerance.epsilon(),
        }
    }

    /// Returns the rectangle spanning the kept side of the half-plane far enough to enclose the
    /// given extent.
    pub fn rectangle(&self, enclosing: Option<&Extent<T>>) -> Extent<T> {
        let longitude: T = scalar(Self::LONGITUDE_REACH);
        let latitude: T = scalar(Self::LATITUDE_REACH);

        let mut reach = Extent::new(-longitude, -latitude, longitude, latitude);
        if let Some(extent) = enclosing {
            reach = reach.union(&extent.expanded(T::one()));
        }

        match (self.axis, self.keep) {
            (Axis::Longitude, Side::Near) => reach.max_x = self.value,
            (Axis::Longitude, Side::Far) => reach.min_x = self.value,
            (Axis::Latitude, Side::Near) => reach.max_y = self.value,
            (Axis::Latitude, Side::Far) => reach.min_y = self.value,
        }

        reach
    }
}

/// The region a geometry gets clipped to.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipBoundary<T = f64> {
    /// An arbitrary simple polygon.
    Ring(Ring<T>),
    /// An axis-aligned rectangle.
    Rectangle(Extent<T>),
    /// One side of a longitude or latitude cut line.
    HalfPlane(HalfPlane<T>),
}

impl<T> From<Ring<T>> for ClipBoundary<T> {
    fn from(ring: Ring<T>) -> Self {
        Self::Ring(ring)
    }
}

impl<T> From<Extent<T>> for ClipBoundary<T> {
    fn from(extent: Extent<T>) -> Self {
        Self::Rectangle(extent)
    }
}

impl<T> From<HalfPlane<T>> for ClipBoundary<T> {
    fn from(half_plane: HalfPlane<T>) -> Self {
        Self::HalfPlane(half_plane)
    }
}

impl<T> ClipBoundary<T>
where
    T: Float,
{
    /// Returns a ring boundary for the exterior of each polygon in the given shape.
    pub fn from_shape(shape: &Shape<T>) -> Vec<Self> {
        shape
            .polygons
            .iter()
            .filter(|polygon| polygon.exterior.is_valid())
            .map(|polygon| Self::Ring(polygon.exterior.clone()))
            .collect()
    }

    /// Returns true if, and only if, the given point lays inside the boundary or on its edges.
    pub fn contains(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        match self {
            Self::Ring(ring) => ring.covers(point, tolerance),
            Self::Rectangle(extent) => extent.contains_point(point, tolerance),
            Self::HalfPlane(half_plane) => half_plane.contains(point, tolerance),
        }
    }

    /// Returns the bounding box of the boundary, if it is bounded.
    pub fn extent(&self) -> Option<Extent<T>> {
        match self {
            Self::Ring(ring) => ring.extent(),
            Self::Rectangle(extent) => Some(*extent),
            Self::HalfPlane(_) => None,
        }
    }

    /// Returns true if, and only if, the given extent may share any point with the boundary.
    pub fn extent_overlaps(&self, extent: &Extent<T>, tolerance: &Tolerance<T>) -> bool {
        match self {
            Self::Ring(ring) => ring
                .extent()
                .is_some_and(|bounds| bounds.intersects(extent, tolerance)),
            Self::Rectangle(bounds) => bounds.intersects(extent, tolerance),
            Self::HalfPlane(half_plane) => half_plane.extent_overlaps(extent, tolerance),
        }
    }

    /// Returns true if, and only if, the whole given extent lays inside the boundary.
    pub fn is_extent_fully_inside(&self, extent: &Extent<T>, tolerance: &Tolerance<T>) -> bool {
        match self {
            Self::Ring(ring) => {
                extent
                    .corners()
                    .iter()
                    .all(|corner| ring.covers(corner, tolerance))
                    && !ring.edges().any(|segment| {
                        extent
                            .expanded(-tolerance.epsilon())
                            .clip_segment(segment.from, segment.to)
                            .is_some_and(|(enter, leave)| leave > enter)
                    })
            }
            Self::Rectangle(bounds) => bounds.contains_extent(extent, tolerance),
            Self::HalfPlane(half_plane) => half_plane.is_extent_fully_inside(extent, tolerance),
        }
    }

    /// Returns true if, and only if, the boundary encloses no area.
    pub fn is_degenerate(&self, tolerance: &Tolerance<T>) -> bool {
        match self {
            Self::Ring(ring) => !ring.is_valid() || ring.area() <= tolerance.epsilon(),
            Self::Rectangle(extent) => extent.is_degenerate(tolerance),
            Self::HalfPlane(half_plane) => !half_plane.value.is_finite(),
        }
    }

    /// Returns the closed list of points walking the boundary clockwise, the first point
    /// repeated at the end.
    ///
    /// Rectangles start at their [`RectCorner::LeftBottom`] corner. Half-planes are walked as
    /// the rectangle spanning their kept side.
    pub fn boundary_points(&self) -> Vec<Point<T>> {
        let mut points = match self {
            Self::Ring(ring) => ring.clone().clockwise().vertices,
            Self::Rectangle(extent) => extent.corners().to_vec(),
            Self::HalfPlane(half_plane) => half_plane.rectangle(None).corners().to_vec(),
        };

        if let Some(first) = points.first().copied() {
            points.push(first);
        }

        points
    }
}

/// A location on the border, as the edge it lays on and the distance from the start of that
/// edge.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct BorderPosition<T> {
    pub edge: usize,
    pub offset: T,
}

impl<T> BorderPosition<T>
where
    T: Float,
{
    pub fn is_close(&self, rhs: &Self, tolerance: &Tolerance<T>) -> bool {
        self.edge == rhs.edge && (self.offset - rhs.offset).abs() <= tolerance.epsilon()
    }
}

/// The walkable form of a [`ClipBoundary`]: a clockwise loop of edges.
#[derive(Debug, Clone)]
pub(crate) enum Border<T> {
    Ring(Ring<T>),
    Rectangle(Extent<T>),
}

impl<T> Border<T>
where
    T: Float,
{
    /// Returns the border of the given boundary, spanning far enough to enclose the given
    /// extent when the boundary is unbounded.
    pub fn new(boundary: &ClipBoundary<T>, subject: &Extent<T>) -> Self {
        match boundary {
            ClipBoundary::Ring(ring) => Self::Ring(ring.clone().clockwise()),
            ClipBoundary::Rectangle(extent) => Self::Rectangle(*extent),
            ClipBoundary::HalfPlane(half_plane) => {
                Self::Rectangle(half_plane.rectangle(Some(subject)))
            }
        }
    }

    /// Returns the clockwise vertices of the border, tagged with their corner if the border is
    /// a rectangle.
    pub fn vertices(&self) -> Vec<(Point<T>, Option<RectCorner>)> {
        match self {
            Self::Ring(ring) => ring.vertices.iter().map(|vertex| (*vertex, None)).collect(),
            Self::Rectangle(extent) => extent
                .corners()
                .into_iter()
                .zip(RectCorner::ALL)
                .map(|(corner, tag)| (corner, Some(tag)))
                .collect(),
        }
    }

    /// Returns the border as a clockwise ring.
    pub fn ring(&self) -> Ring<T> {
        match self {
            Self::Ring(ring) => ring.clone(),
            Self::Rectangle(extent) => Ring {
                vertices: extent.corners().to_vec(),
            },
        }
    }

    /// Returns true if, and only if, the given point lays inside the border or on it.
    pub fn contains(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        match self {
            Self::Ring(ring) => ring.covers(point, tolerance),
            Self::Rectangle(extent) => extent.contains_point(point, tolerance),
        }
    }

    /// Returns the fractions of the given segment at which it meets the border.
    pub fn crossings(&self, segment: &Segment<'_, T>, tolerance: &Tolerance<T>) -> Vec<T> {
        match self {
            Self::Ring(ring) => ring
                .edges()
                .filter_map(|edge| segment.crossings(&edge, tolerance))
                .flatten()
                .collect(),
            Self::Rectangle(extent) => extent
                .clip_segment(segment.from, segment.to)
                .map(|(enter, leave)| vec![enter, leave])
                .unwrap_or_default(),
        }
    }

    /// Returns the position on the border closest to the given point, together with the point
    /// moved onto that position.
    pub fn locate(
        &self,
        point: &Point<T>,
        tolerance: &Tolerance<T>,
    ) -> (BorderPosition<T>, Point<T>) {
        let (edge, offset, length, location) = match self {
            Self::Ring(ring) => Self::locate_on_ring(ring, point),
            Self::Rectangle(extent) => Self::locate_on_rectangle(extent, point),
        };

        let vertices = self.vertices();
        if length - offset > tolerance.epsilon() || vertices.is_empty() {
            return (BorderPosition { edge, offset }, point.moved_to(&location));
        }

        let next = (edge + 1) % vertices.len();
        (
            BorderPosition {
                edge: next,
                offset: T::zero(),
            },
            point.moved_to(&vertices[next].0),
        )
    }

    /// Returns the edge of the ring closest to the point, the offset and length along that edge
    /// and the closest location.
    fn locate_on_ring(ring: &Ring<T>, point: &Point<T>) -> (usize, T, T, Point<T>) {
        let closest = ring
            .edges()
            .enumerate()
            .map(|(index, segment)| (index, segment, segment.project(point)))
            .min_by(|a, b| a.2.1.partial_cmp(&b.2.1).unwrap_or(Ordering::Equal));

        let Some((edge, segment, (t, _))) = closest else {
            return (0, T::zero(), T::zero(), *point);
        };

        let length = segment.length();
        (edge, t * length, length, segment.at(t))
    }

    /// Returns the side of the rectangle closest to the point, the offset and length along that
    /// side and the closest location.
    fn locate_on_rectangle(extent: &Extent<T>, point: &Point<T>) -> (usize, T, T, Point<T>) {
        let x = point.x.max(extent.min_x).min(extent.max_x);
        let y = point.y.max(extent.min_y).min(extent.max_y);

        let sides = [
            (x - extent.min_x, y - extent.min_y, extent.height(), Point::new(extent.min_x, y)),
            (extent.max_y - y, x - extent.min_x, extent.width(), Point::new(x, extent.max_y)),
            (extent.max_x - x, extent.max_y - y, extent.height(), Point::new(extent.max_x, y)),
            (y - extent.min_y, extent.max_x - x, extent.width(), Point::new(x, extent.min_y)),
        ];

        let (edge, (_, offset, length, location)) = sides
            .into_iter()
            .enumerate()
            .min_by(|a, b| a.1.0.partial_cmp(&b.1.0).unwrap_or(Ordering::Equal))
            .unwrap_or((0, sides[0]));

        (edge, offset, length, location)
    }

    /// Returns a vertex of the border that does not lay on the given ring, if any.
    pub fn sample(&self, ring: &Ring<T>, tolerance: &Tolerance<T>) -> Option<Point<T>> {
        let vertices = self.vertices();
        vertices
            .iter()
            .map(|(vertex, _)| *vertex)
            .find(|vertex| !ring.is_boundary(vertex, tolerance))
            .or_else(|| {
                let border = self.ring();
                border
                    .edges()
                    .map(|segment| segment.midpoint())
                    .find(|midpoint| !ring.is_boundary(midpoint, tolerance))
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Axis, ClipBoundary, HalfPlane, Side,
        boundary::{Border, BorderPosition},
        cartesian::{Extent, Point, Ring},
    };

    #[test]
    fn boundary_fast_paths() {
        struct Test {
            name: &'static str,
            boundary: ClipBoundary<f64>,
            extent: Extent<f64>,
            want: (bool, bool),
        }

        let concave: Ring<f64> = vec![
            [0., 0.],
            [0., 8.],
            [8., 8.],
            [8., 0.],
            [6., 0.],
            [6., 6.],
            [2., 6.],
            [2., 0.],
        ]
        .into();

        vec![
            Test {
                name: "rectangle enclosing the extent",
                boundary: Extent::new(-5., -5., 15., 15.).into(),
                extent: Extent::new(0., 0., 10., 10.),
                want: (true, true),
            },
            Test {
                name: "rectangle away from the extent",
                boundary: Extent::new(20., 20., 30., 30.).into(),
                extent: Extent::new(0., 0., 10., 10.),
                want: (false, false),
            },
            Test {
                name: "half-plane keeping the near side of the extent",
                boundary: HalfPlane::new(Axis::Longitude, 5., Side::Near).into(),
                extent: Extent::new(0., 0., 10., 10.),
                want: (true, false),
            },
            Test {
                name: "half-plane keeping the far side of the whole extent",
                boundary: HalfPlane::new(Axis::Latitude, -1., Side::Far).into(),
                extent: Extent::new(0., 0., 10., 10.),
                want: (true, true),
            },
            Test {
                name: "half-plane beyond the extent",
                boundary: HalfPlane::new(Axis::Latitude, 11., Side::Far).into(),
                extent: Extent::new(0., 0., 10., 10.),
                want: (false, false),
            },
            Test {
                name: "concave ring whose notch crosses the extent",
                boundary: concave.clone().into(),
                extent: Extent::new(1., 1., 7., 7.),
                want: (true, false),
            },
            Test {
                name: "extent inside the arm of a concave ring",
                boundary: concave.into(),
                extent: Extent::new(6.5, 1., 7.5, 7.),
                want: (true, true),
            },
        ]
        .into_iter()
        .for_each(|test| {
            let tolerance = Default::default();
            let got = (
                test.boundary.extent_overlaps(&test.extent, &tolerance),
                test.boundary.is_extent_fully_inside(&test.extent, &tolerance),
            );

            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn boundary_points_are_clockwise_and_closed() {
        let boundary: ClipBoundary<f64> = Extent::new(5., 5., 15., 15.).into();
        let want: Vec<Point<f64>> = vec![
            [5., 5.].into(),
            [5., 15.].into(),
            [15., 15.].into(),
            [15., 5.].into(),
            [5., 5.].into(),
        ];

        assert_eq!(boundary.boundary_points(), want);

        let boundary: ClipBoundary<f64> =
            Ring::from(vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.]]).into();

        let points = boundary.boundary_points();
        assert_eq!(points.first(), points.last());
        assert!(Ring::from(points).is_clockwise());
    }

    #[test]
    fn border_location() {
        struct Test {
            name: &'static str,
            point: Point<f64>,
            want: (BorderPosition<f64>, Point<f64>),
        }

        let border = Border::new(
            &Extent::new(5., 5., 15., 15.).into(),
            &Extent::new(0., 0., 10., 10.),
        );

        vec![
            Test {
                name: "point on the left side",
                point: [5., 10.].into(),
                want: (BorderPosition { edge: 0, offset: 5. }, [5., 10.].into()),
            },
            Test {
                name: "point on the bottom side",
                point: [10., 5.].into(),
                want: (BorderPosition { edge: 3, offset: 5. }, [10., 5.].into()),
            },
            Test {
                name: "left-top corner",
                point: [5., 15.].into(),
                want: (BorderPosition { edge: 1, offset: 0. }, [5., 15.].into()),
            },
            Test {
                name: "left-bottom corner",
                point: [5., 5.].into(),
                want: (BorderPosition { edge: 0, offset: 0. }, [5., 5.].into()),
            },
            Test {
                name: "point slightly off the right side",
                point: Point::new(15. + 1e-12, 8.).with_z(3.),
                want: (
                    BorderPosition { edge: 2, offset: 7. },
                    Point::new(15., 8.).with_z(3.),
                ),
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = border.locate(&test.point, &Default::default());
            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn ring_border_location() {
        let border = Border::new(
            &Ring::from(vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.]]).into(),
            &Extent::new(0., 0., 10., 10.),
        );

        let Border::Ring(ring) = &border else {
            panic!("ring boundaries must be walked as rings");
        };

        assert!(ring.is_clockwise());
        assert_eq!(ring.vertices[0], Point::new(0., 10.));

        let (position, point) = border.locate(&[4., 10.].into(), &Default::default());
        assert_eq!(position, BorderPosition { edge: 0, offset: 4. });
        assert_eq!(point, Point::new(4., 10.));

        let (position, _) = border.locate(&[10., 10.].into(), &Default::default());
        assert_eq!(position, BorderPosition { edge: 1, offset: 0. });
    }
}
