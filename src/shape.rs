use num_traits::Float;

use crate::cartesian::{Extent, Polygon};

/// A combination of disjoint [`Polygon`]s.
#[derive(Debug, Clone, Default)]
pub struct Shape<T = f64> {
    /// The list of non-crossing [`Polygon`]s.
    pub polygons: Vec<Polygon<T>>,
}

impl<T> From<Polygon<T>> for Shape<T> {
    fn from(polygon: Polygon<T>) -> Self {
        Self {
            polygons: vec![polygon],
        }
    }
}

impl<T> From<Vec<Polygon<T>>> for Shape<T> {
    fn from(polygons: Vec<Polygon<T>>) -> Self {
        Self { polygons }
    }
}

impl<T> PartialEq for Shape<T>
where
    T: PartialEq,
{
    /// Two shapes are equal if, and only if, they are made of the same polygons, no matter the
    /// order.
    fn eq(&self, other: &Self) -> bool {
        if self.polygons.len() != other.polygons.len() {
            return false;
        }

        self.polygons
            .iter()
            .all(|a| other.polygons.iter().any(|b| a.eq(b)))
    }
}

impl<T> Shape<T> {
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Returns the amount of vertices in the shape.
    pub fn total_vertices(&self) -> usize {
        self.polygons.iter().map(Polygon::total_vertices).sum()
    }
}

impl<T> Shape<T>
where
    T: Float,
{
    /// Returns the sum of the areas of all the polygons.
    pub fn area(&self) -> T {
        self.polygons
            .iter()
            .fold(T::zero(), |area, polygon| area + polygon.area())
    }

    pub fn extent(&self) -> Option<Extent<T>> {
        Extent::from_points(
            self.polygons
                .iter()
                .flat_map(|polygon| &polygon.exterior.vertices),
        )
    }
}
