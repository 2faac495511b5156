use num_traits::Float;

use crate::{Tolerance, cartesian::Point};

/// An axis-aligned box in the plain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<T = f64> {
    pub min_x: T,
    pub min_y: T,
    pub max_x: T,
    pub max_y: T,
}

impl<T> Extent<T>
where
    T: Float,
{
    /// Returns the extent delimited by the given coordinates, in any order.
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Returns the smallest extent enclosing all the given points, if any.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point<T>>) -> Option<Self>
    where
        T: 'a,
    {
        points.into_iter().fold(None, |extent, point| {
            Some(match extent {
                None => Self::new(point.x, point.y, point.x, point.y),
                Some(extent) => Self {
                    min_x: extent.min_x.min(point.x),
                    min_y: extent.min_y.min(point.y),
                    max_x: extent.max_x.max(point.x),
                    max_y: extent.max_y.max(point.y),
                },
            })
        })
    }

    pub fn width(&self) -> T {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> T {
        self.max_y - self.min_y
    }

    /// Returns true if, and only if, the extent has no area.
    pub fn is_degenerate(&self, tolerance: &Tolerance<T>) -> bool {
        self.width() <= tolerance.epsilon() || self.height() <= tolerance.epsilon()
    }

    /// Returns the smallest extent enclosing both, self and rhs.
    pub fn union(&self, rhs: &Self) -> Self {
        Self {
            min_x: self.min_x.min(rhs.min_x),
            min_y: self.min_y.min(rhs.min_y),
            max_x: self.max_x.max(rhs.max_x),
            max_y: self.max_y.max(rhs.max_y),
        }
    }

    /// Returns self grown by the given margin on every side.
    ///
    /// A negative margin shrinks the extent instead.
    pub fn expanded(&self, margin: T) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Returns true if, and only if, the given point lays inside the extent or on its edges.
    pub fn contains_point(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        let epsilon = tolerance.epsilon();
        point.x >= self.min_x - epsilon
            && point.x <= self.max_x + epsilon
            && point.y >= self.min_y - epsilon
            && point.y <= self.max_y + epsilon
    }

    /// Returns true if, and only if, self and rhs share any point, edges included.
    pub fn intersects(&self, rhs: &Self, tolerance: &Tolerance<T>) -> bool {
        let epsilon = tolerance.epsilon();
        self.min_x <= rhs.max_x + epsilon
            && rhs.min_x <= self.max_x + epsilon
            && self.min_y <= rhs.max_y + epsilon
            && rhs.min_y <= self.max_y + epsilon
    }

    /// Returns true if, and only if, rhs lays entirely inside self, edges included.
    pub fn contains_extent(&self, rhs: &Self, tolerance: &Tolerance<T>) -> bool {
        let epsilon = tolerance.epsilon();
        rhs.min_x >= self.min_x - epsilon
            && rhs.max_x <= self.max_x + epsilon
            && rhs.min_y >= self.min_y - epsilon
            && rhs.max_y <= self.max_y + epsilon
    }

    /// Returns the four corners of the extent in clockwise order, starting at the left-bottom one.
    pub fn corners(&self) -> [Point<T>; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.max_x, self.min_y),
        ]
    }

    /// Returns the range of fractions of the segment from `from` to `to` that lays inside the
    /// extent, if any.
    pub(crate) fn clip_segment(&self, from: &Point<T>, to: &Point<T>) -> Option<(T, T)> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;

        let constraints = [
            (-dx, from.x - self.min_x),
            (dx, self.max_x - from.x),
            (-dy, from.y - self.min_y),
            (dy, self.max_y - from.y),
        ];

        constraints
            .into_iter()
            .try_fold((T::zero(), T::one()), |(enter, leave), (p, q)| {
                if p.is_zero() {
                    return (q >= T::zero()).then_some((enter, leave));
                }

                let r = q / p;
                if p < T::zero() {
                    (r <= leave).then(|| (enter.max(r), leave))
                } else {
                    (r >= enter).then(|| (enter, leave.min(r)))
                }
            })
    }
}
