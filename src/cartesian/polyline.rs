use num_traits::Float;

use crate::cartesian::{Extent, Point, Segment};

/// An ordered list of vertices describing a line in the plain.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline<T = f64> {
    /// The ordered list of vertices describing the line.
    pub vertices: Vec<Point<T>>,
    /// Whether the last vertex connects back to the first one.
    pub closed: bool,
}

impl<T, P> From<Vec<P>> for Polyline<T>
where
    P: Into<Point<T>>,
{
    fn from(vertices: Vec<P>) -> Self {
        Self {
            vertices: vertices.into_iter().map(Into::into).collect(),
            closed: false,
        }
    }
}

impl<T> Polyline<T> {
    /// Returns self connecting its last vertex back to the first one.
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Returns true if, and only if, the polyline has enough vertices to describe a line.
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 2
    }

    /// Returns an ordered iterator over all the segments of the polyline, including the closing
    /// one if the polyline is closed.
    pub fn edges(&self) -> impl Iterator<Item = Segment<'_, T>> {
        let closing = self
            .closed
            .then(|| self.vertices.last().zip(self.vertices.first()))
            .flatten()
            .filter(|_| self.vertices.len() > 2);

        self.vertices
            .iter()
            .zip(self.vertices.iter().skip(1))
            .chain(closing)
            .map(|(from, to)| Segment { from, to })
    }
}

impl<T> Polyline<T>
where
    T: Float,
{
    pub fn extent(&self) -> Option<Extent<T>> {
        Extent::from_points(&self.vertices)
    }

    /// Returns the sum of the lengths of all the segments.
    pub fn length(&self) -> T {
        self.edges()
            .fold(T::zero(), |length, segment| length + segment.length())
    }
}

/// A line made of multiple disjoint parts.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolyline<T = f64> {
    pub parts: Vec<Polyline<T>>,
}

impl<T> From<Polyline<T>> for MultiPolyline<T> {
    fn from(polyline: Polyline<T>) -> Self {
        Self {
            parts: vec![polyline],
        }
    }
}

impl<T> From<Vec<Polyline<T>>> for MultiPolyline<T> {
    fn from(parts: Vec<Polyline<T>>) -> Self {
        Self { parts }
    }
}

impl<T> MultiPolyline<T> {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<T> MultiPolyline<T>
where
    T: Float,
{
    pub fn extent(&self) -> Option<Extent<T>> {
        Extent::from_points(self.parts.iter().flat_map(|part| &part.vertices))
    }

    pub fn length(&self) -> T {
        self.parts
            .iter()
            .fold(T::zero(), |length, part| length + part.length())
    }
}
