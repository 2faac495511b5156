use num_traits::Float;

use crate::cartesian::{Extent, Ring};

/// A polygon in the plain: an exterior ring and the holes cut out of it.
///
/// Holes are assumed to lay inside the exterior ring and not to overlap each other.
#[derive(Debug, Clone)]
pub struct Polygon<T = f64> {
    /// The outer boundary of the polygon.
    pub exterior: Ring<T>,
    /// The inner boundaries of the polygon.
    pub holes: Vec<Ring<T>>,
}

impl<T> From<Ring<T>> for Polygon<T> {
    fn from(exterior: Ring<T>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }
}

impl<T, P> From<Vec<P>> for Polygon<T>
where
    T: PartialEq,
    P: Into<crate::cartesian::Point<T>>,
{
    fn from(vertices: Vec<P>) -> Self {
        Ring::from(vertices).into()
    }
}

impl<T> PartialEq for Polygon<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.exterior == other.exterior && self.holes == other.holes
    }
}

impl<T> Polygon<T> {
    pub fn new(exterior: impl Into<Ring<T>>, holes: Vec<Ring<T>>) -> Self {
        Self {
            exterior: exterior.into(),
            holes,
        }
    }

    /// Returns self with the given hole.
    pub fn with_hole(mut self, hole: impl Into<Ring<T>>) -> Self {
        self.holes.push(hole.into());
        self
    }

    /// Returns an iterator over the exterior ring followed by all the holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring<T>> {
        std::iter::once(&self.exterior).chain(&self.holes)
    }

    /// Returns the total amount of vertices in the polygon.
    pub fn total_vertices(&self) -> usize {
        self.rings().map(Ring::len).sum()
    }
}

impl<T> Polygon<T>
where
    T: Float,
{
    /// Returns the area of the exterior ring minus the area of the holes.
    pub fn area(&self) -> T {
        self.holes
            .iter()
            .fold(self.exterior.area(), |area, hole| area - hole.area())
    }

    pub fn extent(&self) -> Option<Extent<T>> {
        self.exterior.extent()
    }
}
