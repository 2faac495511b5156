use std::cmp::Ordering;

use num_traits::Float;

use crate::{
    IsClose, Tolerance,
    cartesian::{Extent, Point, Segment},
};

/// A closed loop of points in the plain.
///
/// The ring is implicitly closed: the last vertex connects back to the first one, which is never
/// repeated at the end of the list.
#[derive(Debug, Clone)]
pub struct Ring<T = f64> {
    /// The ordered list of vertices describing the ring.
    pub vertices: Vec<Point<T>>,
}

impl<T, P> From<Vec<P>> for Ring<T>
where
    T: PartialEq,
    P: Into<Point<T>>,
{
    fn from(vertices: Vec<P>) -> Self {
        let mut vertices: Vec<Point<T>> = vertices.into_iter().map(Into::into).collect();
        if vertices.len() > 1
            && let (Some(first), Some(last)) = (vertices.first(), vertices.last())
            && first.x == last.x
            && first.y == last.y
        {
            vertices.pop();
        }

        Self { vertices }
    }
}

impl<T> PartialEq for Ring<T>
where
    T: PartialEq,
{
    /// Two rings are equal if, and only if, they have the same vertices describing the same
    /// boundary, no matter the vertex they start at.
    fn eq(&self, other: &Self) -> bool {
        let len = self.vertices.len();
        if len != other.vertices.len() {
            return false;
        }

        if len == 0 {
            return true;
        }

        (0..len).any(|start| {
            other
                .vertices
                .iter()
                .cycle()
                .skip(start)
                .take(len)
                .eq(self.vertices.iter())
        })
    }
}

impl<T> IntoIterator for Ring<T> {
    type Item = Point<T>;
    type IntoIter = std::vec::IntoIter<Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.into_iter()
    }
}

impl<T> Ring<T> {
    /// Returns an ordered iterator over all the vertices of the ring.
    ///
    /// By definition, a ring is a closed shape, hence the latest point of the iterator equals
    /// the very first.
    pub fn closed_vertices(&self) -> impl Iterator<Item = &Point<T>> {
        self.vertices.iter().chain(self.vertices.first())
    }

    /// Returns an ordered iterator over all the segments of the ring.
    pub fn edges(&self) -> impl Iterator<Item = Segment<'_, T>> {
        self.closed_vertices()
            .zip(self.closed_vertices().skip(1))
            .map(|(from, to)| Segment { from, to })
    }

    /// Returns the amount of vertices in the ring.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if, and only if, the ring has enough vertices to enclose an area.
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Returns the ring with the opposite orientation.
    pub fn reversed(mut self) -> Self {
        self.vertices.reverse();
        self
    }
}

impl<T> Ring<T>
where
    T: Float,
{
    /// Returns the area enclosed by the ring, positive if counter-clockwise and negative
    /// otherwise.
    pub fn signed_area(&self) -> T {
        let twice = self.edges().fold(T::zero(), |area, segment| {
            area + (segment.from.x * segment.to.y - segment.to.x * segment.from.y)
        });

        twice / (T::one() + T::one())
    }

    /// Returns the area enclosed by the ring.
    pub fn area(&self) -> T {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < T::zero()
    }

    /// Returns the ring oriented clockwise.
    pub fn clockwise(self) -> Self {
        if self.is_clockwise() {
            self
        } else {
            self.reversed()
        }
    }

    /// Returns the ring oriented counter-clockwise.
    pub fn counter_clockwise(self) -> Self {
        if self.is_clockwise() {
            self.reversed()
        } else {
            self
        }
    }

    pub fn extent(&self) -> Option<Extent<T>> {
        Extent::from_points(&self.vertices)
    }

    /// Returns true if, and only if, the given point lays on any edge of the ring.
    pub fn is_boundary(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        self.edges().any(|segment| segment.contains(point, tolerance))
    }

    /// Returns true if, and only if, the given point lays strictly inside the ring according to
    /// the even-odd rule.
    pub fn contains(&self, point: &Point<T>) -> bool {
        self.edges()
            .filter(|segment| (segment.from.y > point.y) != (segment.to.y > point.y))
            .filter(|segment| {
                let x = segment.from.x
                    + (point.y - segment.from.y) * (segment.to.x - segment.from.x)
                        / (segment.to.y - segment.from.y);

                point.x < x
            })
            .count()
            % 2
            == 1
    }

    /// Returns true if, and only if, the given point lays inside the ring or on its boundary.
    pub fn covers(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        self.is_boundary(point, tolerance) || self.contains(point)
    }

    /// Returns the clockwise rings made of the given traced points that enclose any area.
    ///
    /// A loop touching itself, either at a repeated vertex or at a vertex laying on another of
    /// its edges, is split there into as many rings. Consecutive duplicates and spikes folding
    /// back over the previous edge are removed before the area of each ring is checked.
    pub(crate) fn traced(points: Vec<Point<T>>, tolerance: &Tolerance<T>) -> Vec<Self> {
        let mut vertices: Vec<Point<T>> = Vec::with_capacity(points.len());
        for point in points {
            if vertices
                .last()
                .is_none_or(|last| !last.is_close(&point, tolerance))
            {
                vertices.push(point);
            }
        }

        while vertices.len() > 1
            && let (Some(first), Some(last)) = (vertices.first(), vertices.last())
            && first.is_close(last, tolerance)
        {
            vertices.pop();
        }

        split_at_touches(with_touching_vertices(vertices, tolerance), tolerance)
            .into_iter()
            .filter_map(|vertices| Self::cleaned(vertices, tolerance))
            .collect()
    }

    /// Returns a clockwise ring without spikes made of the given vertices, if it encloses any
    /// area.
    fn cleaned(mut vertices: Vec<Point<T>>, tolerance: &Tolerance<T>) -> Option<Self> {
        vertices.dedup_by(|a, b| a.is_close(b, tolerance));

        loop {
            while vertices.len() > 1
                && let (Some(first), Some(last)) = (vertices.first(), vertices.last())
                && first.is_close(last, tolerance)
            {
                vertices.pop();
            }

            let len = vertices.len();
            if len < 3 {
                return None;
            }

            let spike = (0..len).find(|&index| {
                let previous = &vertices[(index + len - 1) % len];
                let current = &vertices[index];
                let next = &vertices[(index + 1) % len];

                previous.is_close(next, tolerance)
                    || Segment::new(current, previous).contains(next, tolerance)
                    || Segment::new(current, next).contains(previous, tolerance)
            });

            let Some(spike) = spike else {
                break;
            };

            vertices.remove(spike);
            vertices.dedup_by(|a, b| a.is_close(b, tolerance));
        }

        let ring = Self { vertices };
        (ring.area() > tolerance.epsilon()).then(|| ring.clockwise())
    }
}

/// Returns the closed loop of vertices with a copy of every vertex laying on a non-adjacent edge
/// inserted into that edge, so that every touch becomes a repeated vertex.
fn with_touching_vertices<T>(vertices: Vec<Point<T>>, tolerance: &Tolerance<T>) -> Vec<Point<T>>
where
    T: Float,
{
    let len = vertices.len();
    if len < 4 {
        return vertices;
    }

    let mut output = Vec::with_capacity(len);
    for (index, from) in vertices.iter().enumerate() {
        let to = &vertices[(index + 1) % len];
        let segment = Segment::new(from, to);

        let mut touches: Vec<(T, Point<T>)> = vertices
            .iter()
            .filter(|vertex| !vertex.is_close(from, tolerance) && !vertex.is_close(to, tolerance))
            .filter(|vertex| segment.contains(vertex, tolerance))
            .map(|vertex| (segment.project(vertex).0, *vertex))
            .collect();

        touches.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        output.push(*from);
        output.extend(touches.into_iter().map(|(_, vertex)| vertex));
    }

    output.dedup_by(|a, b| a.is_close(b, tolerance));
    output
}

/// Splits the closed loop of vertices into as many loops as times it goes through a vertex
/// already visited.
fn split_at_touches<T>(vertices: Vec<Point<T>>, tolerance: &Tolerance<T>) -> Vec<Vec<Point<T>>>
where
    T: Float,
{
    let mut loops = Vec::new();
    let mut pending: Vec<Point<T>> = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        if let Some(start) = pending
            .iter()
            .position(|visited| visited.is_close(&vertex, tolerance))
        {
            loops.push(pending.split_off(start));
        }

        pending.push(vertex);
    }

    loops.push(pending);
    loops
}
