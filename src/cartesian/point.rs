use num_traits::Float;

use crate::{IsClose, Tolerance};

/// A point in the plain.
///
/// The optional `z` and `m` values are a payload: they never take part in a clip test and are
/// carried through untouched by every vertex of the input geometry.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Point<T = f64> {
    /// The horizontal coordinate of the point.
    pub x: T,
    /// The vertical coordinate of the point.
    pub y: T,
    /// The elevation of the point, if any.
    pub z: Option<T>,
    /// The measure of the point, if any.
    pub m: Option<T>,
}

impl<T> From<[T; 2]> for Point<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self::new(x, y)
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl<T> Point<T> {
    /// Returns a point with no payload at the given coordinates.
    pub fn new(x: T, y: T) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    /// Returns self with the given elevation.
    pub fn with_z(self, z: T) -> Self {
        Self { z: Some(z), ..self }
    }

    /// Returns self with the given measure.
    pub fn with_m(self, m: T) -> Self {
        Self { m: Some(m), ..self }
    }
}

impl<T> Point<T>
where
    T: Float,
{
    /// Returns the euclidean distance between self and rhs.
    pub fn distance(&self, rhs: &Self) -> T {
        (self.x - rhs.x).hypot(self.y - rhs.y)
    }

    /// Returns the point at the given fraction of the way from self to rhs.
    ///
    /// The payload is interpolated as well whenever both ends carry it.
    pub(crate) fn lerp(&self, rhs: &Self, t: T) -> Self {
        let lerp = |from: T, to: T| from + (to - from) * t;
        let payload = |from: Option<T>, to: Option<T>| match (from, to) {
            (Some(from), Some(to)) => Some(lerp(from, to)),
            (from, to) => from.or(to),
        };

        Self {
            x: lerp(self.x, rhs.x),
            y: lerp(self.y, rhs.y),
            z: payload(self.z, rhs.z),
            m: payload(self.m, rhs.m),
        }
    }

    /// Returns self relocated to the coordinates of the given point, keeping the payload.
    pub(crate) fn moved_to(self, location: &Self) -> Self {
        Self {
            x: location.x,
            y: location.y,
            ..self
        }
    }
}

impl<T> IsClose for Point<T>
where
    T: Float,
{
    type Scalar = T;

    /// Compares the planar coordinates only.
    fn is_close(&self, rhs: &Self, tolerance: &Tolerance<T>) -> bool {
        self.x.is_close(&rhs.x, tolerance) && self.y.is_close(&rhs.y, tolerance)
    }
}

/// A constructor macro for the cartesian [`Point`].
#[macro_export]
macro_rules! cartesian_point {
    ($x:expr, $y:expr) => {
        $crate::cartesian::Point::new($x, $y)
    };
}

pub use cartesian_point;
