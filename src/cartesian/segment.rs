use num_traits::Float;

use crate::{
    MaybePair, Tolerance,
    cartesian::Point,
};

/// Returns the perp-dot product of two vectors: the determinant of the matrix having them as
/// columns.
fn perp_dot<T>((ax, ay): (T, T), (bx, by): (T, T)) -> T
where
    T: Float,
{
    ax * by - bx * ay
}

/// The straight line between two endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a, T> {
    /// The first point in the segment.
    pub from: &'a Point<T>,
    /// The last point in the segment.
    pub to: &'a Point<T>,
}

impl<'a, T> Segment<'a, T> {
    pub fn new(from: &'a Point<T>, to: &'a Point<T>) -> Self {
        Self { from, to }
    }
}

impl<T> Segment<'_, T>
where
    T: Float,
{
    /// Returns the vector going from the first endpoint to the last one.
    fn direction(&self) -> (T, T) {
        (self.to.x - self.from.x, self.to.y - self.from.y)
    }

    /// Returns the distance between the two endpoints of the segment.
    pub fn length(&self) -> T {
        self.from.distance(self.to)
    }

    /// Returns the middle point of the segment.
    pub fn midpoint(&self) -> Point<T> {
        self.at(T::one() / (T::one() + T::one()))
    }

    /// Returns the point at the given fraction of the segment.
    ///
    /// The fractions zero and one yield the endpoints untouched.
    pub fn at(&self, t: T) -> Point<T> {
        if t <= T::zero() {
            *self.from
        } else if t >= T::one() {
            *self.to
        } else {
            self.from.lerp(self.to, t)
        }
    }

    /// Returns the fraction of the segment closest to the given point, together with the distance
    /// between that location and the point.
    pub fn project(&self, point: &Point<T>) -> (T, T) {
        let dx = self.to.x - self.from.x;
        let dy = self.to.y - self.from.y;
        let squared = dx * dx + dy * dy;

        if squared.is_zero() {
            return (T::zero(), self.from.distance(point));
        }

        let t = (((point.x - self.from.x) * dx + (point.y - self.from.y) * dy) / squared)
            .max(T::zero())
            .min(T::one());

        let closest = Point::new(self.from.x + dx * t, self.from.y + dy * t);
        (t, closest.distance(point))
    }

    /// Returns true if, and only if, the given point lays on the segment.
    pub fn contains(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        let (_, distance) = self.project(point);
        distance <= tolerance.epsilon()
    }

    /// Returns the fractions of self at which it meets rhs, if any.
    ///
    /// Crossing segments meet at a single fraction. Collinear segments yield the fractions of the
    /// endpoints of rhs that fall in self, which may be one, two or none.
    pub fn crossings(&self, rhs: &Segment<'_, T>, tolerance: &Tolerance<T>) -> Option<MaybePair<T>> {
        let length = self.length();
        let rhs_length = rhs.length();
        let epsilon = tolerance.epsilon();

        if length <= epsilon {
            return None;
        }

        if rhs_length <= epsilon {
            return self
                .contains(rhs.from, tolerance)
                .then(|| MaybePair::Single(self.project(rhs.from).0));
        }

        let determinant = perp_dot(self.direction(), rhs.direction());
        if determinant.abs() <= epsilon * length * rhs_length {
            return self.collinear_crossings(rhs, tolerance);
        }

        let offset = (rhs.from.x - self.from.x, rhs.from.y - self.from.y);
        let t = perp_dot(offset, rhs.direction()) / determinant;
        let u = perp_dot(offset, self.direction()) / determinant;

        let slack = epsilon / length;
        let rhs_slack = epsilon / rhs_length;
        if t < -slack || t > T::one() + slack || u < -rhs_slack || u > T::one() + rhs_slack {
            return None;
        }

        Some(MaybePair::Single(t.max(T::zero()).min(T::one())))
    }

    /// Being self and rhs parallel, returns the fractions of self at which the endpoints of rhs
    /// lay, if they are collinear.
    fn collinear_crossings(
        &self,
        rhs: &Segment<'_, T>,
        tolerance: &Tolerance<T>,
    ) -> Option<MaybePair<T>> {
        let offset = (rhs.from.x - self.from.x, rhs.from.y - self.from.y);
        let distance = perp_dot(self.direction(), offset).abs() / self.length();

        if distance > tolerance.epsilon() {
            return None;
        }

        let fraction = |point: &Point<T>| {
            self.contains(point, tolerance)
                .then(|| self.project(point).0)
        };

        MaybePair::from_options(fraction(rhs.from), fraction(rhs.to))
    }
}
